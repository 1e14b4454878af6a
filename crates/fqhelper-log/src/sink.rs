use crate::{LogRecord, Priority};
use std::sync::Mutex;

/// Destino dos registros emitidos pela ponte.
///
/// A escrita é best-effort: nenhuma implementação devolve erro.
pub trait LogSink: Send + Sync {
    fn write(&self, priority: Priority, tag: &str, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn write(&self, priority: Priority, tag: &str, message: &str) {
        (**self).write(priority, tag, message)
    }
}

/// Log do sistema: liblog no Android, fachada `log` no resto.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformSink;

#[cfg(target_os = "android")]
mod liblog {
    use std::os::raw::{c_char, c_int};

    #[link(name = "log")]
    extern "C" {
        pub fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
    }
}

impl LogSink for PlatformSink {
    #[cfg(target_os = "android")]
    fn write(&self, priority: Priority, tag: &str, message: &str) {
        let tag = to_c_string(tag);
        let text = to_c_string(message);
        // o código de retorno da liblog é ignorado
        unsafe {
            liblog::__android_log_write(priority.as_raw(), tag.as_ptr(), text.as_ptr());
        }
    }

    #[cfg(not(target_os = "android"))]
    fn write(&self, priority: Priority, tag: &str, message: &str) {
        log::log!(target: tag, priority.to_level(), "{message}");
    }
}

/// Converte para C string removendo bytes NUL internos, para nunca perder a escrita.
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
pub(crate) fn to_c_string(s: &str) -> std::ffi::CString {
    let bytes: Vec<u8> = s.bytes().filter(|b| *b != 0).collect();
    std::ffi::CString::new(bytes).unwrap_or_default()
}

/// Guarda os registros em memória, na ordem de chegada.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().expect("mutex poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records.lock().expect("mutex poisoned").clear();
    }
}

impl LogSink for MemorySink {
    fn write(&self, priority: Priority, tag: &str, message: &str) {
        let record = LogRecord::new(priority, tag, message);
        self.records.lock().expect("mutex poisoned").push(record);
    }
}

/// Imprime cada registro no formato "brief" do logcat.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write(&self, priority: Priority, tag: &str, message: &str) {
        println!("{}/{}: {}", priority, tag, message);
    }
}
