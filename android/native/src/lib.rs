//! Biblioteca nativa do módulo Xposed FQHelper (`libfqhelper.so`).
//!
//! Exporta `NativeLib.doSomething()` para o lado Java e o hook `JNI_OnLoad`.
//! Toda a lógica vive em [`bridge::LogBridge`]; as funções exportadas só
//! fazem a ponte com a convenção JNI.

pub mod bridge;

use bridge::LogBridge;
use fqhelper_log::PlatformSink;
use jni::objects::JClass;
use jni::sys::{jint, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};
use once_cell::sync::Lazy;
use std::os::raw::c_void;
use std::panic::{self, AssertUnwindSafe};

/// Classe Java que declara os métodos nativos.
pub const NATIVE_CLASS: &str = "com/xxhy/fqhelper/xposed/NativeLib";

/// Nome do arquivo carregado por `System.loadLibrary("fqhelper")`.
pub const LIBRARY_FILE: &str = concat!("lib", env!("CARGO_CRATE_NAME"), ".so");

static BRIDGE: Lazy<LogBridge<PlatformSink>> = Lazy::new(|| {
    fqhelper_log::init_logging();
    LogBridge::new(PlatformSink)
});

/// Executa `f` sem deixar um panic atravessar a fronteira FFI.
fn ffi_guard<F: FnOnce()>(name: &str, f: F) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic desconhecido".to_string());
        log::error!("panic capturado em {name}: {msg}");
    }
}

/// Chamado pela VM ao carregar a biblioteca.
#[no_mangle]
pub extern "system" fn JNI_OnLoad(_vm: JavaVM, _reserved: *mut c_void) -> jint {
    ffi_guard("JNI_OnLoad", || {
        fqhelper_log::init_logging();
        log::debug!("{LIBRARY_FILE} carregada para {NATIVE_CLASS}");
    });
    JNI_VERSION_1_6
}

/// JNI: `static native void doSomething()` de `NativeLib`.
///
/// Os handles do ambiente e da classe não são usados.
#[no_mangle]
pub extern "system" fn Java_com_xxhy_fqhelper_xposed_NativeLib_doSomething(
    _env: JNIEnv,
    _class: JClass,
) {
    ffi_guard("doSomething", || BRIDGE.do_something());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_swallows_panic() {
        ffi_guard("teste", || panic!("falha proposital"));
        ffi_guard("teste", || panic!("{}", String::from("falha com String")));
    }

    #[test]
    fn test_guard_runs_closure() {
        let mut called = false;
        ffi_guard("teste", || called = true);
        assert!(called);
    }

    #[test]
    fn test_symbol_matches_class() {
        let mangled = format!("Java_{}_doSomething", NATIVE_CLASS.replace('/', "_"));
        assert_eq!(mangled, "Java_com_xxhy_fqhelper_xposed_NativeLib_doSomething");
    }

    #[test]
    fn test_library_file_name() {
        assert_eq!(LIBRARY_FILE, "libfqhelper.so");
    }

    #[test]
    fn test_global_bridge_logs_once_per_call() {
        capture::start();

        BRIDGE.do_something();
        BRIDGE.do_something();

        let entries = capture::take();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| *e == capture::expected()));
    }

    #[test]
    fn test_exported_symbol_logs_one_record() {
        capture::start();

        // handles nunca são lidos pela ponte
        let mut table: *const jni::sys::JNINativeInterface_ = std::ptr::null();
        let raw_env = &mut table as *mut _ as *mut jni::sys::JNIEnv;
        let env = unsafe { JNIEnv::from_raw(raw_env) }.unwrap();
        let class = unsafe { JClass::from_raw(std::ptr::null_mut()) };

        Java_com_xxhy_fqhelper_xposed_NativeLib_doSomething(env, class);

        assert_eq!(capture::take(), vec![capture::expected()]);
    }

    /// Logger de teste que guarda os registros por thread.
    mod capture {
        use log::{Level, Log, Metadata, Record};
        use std::cell::RefCell;
        use std::sync::Once;

        pub type Entry = (Level, String, String);

        thread_local! {
            static ENTRIES: RefCell<Vec<Entry>> = const { RefCell::new(Vec::new()) };
        }

        struct CaptureLogger;

        impl Log for CaptureLogger {
            fn enabled(&self, _metadata: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                let entry = (
                    record.level(),
                    record.target().to_string(),
                    record.args().to_string(),
                );
                ENTRIES.with(|e| e.borrow_mut().push(entry));
            }

            fn flush(&self) {}
        }

        static LOGGER: CaptureLogger = CaptureLogger;

        pub fn start() {
            static INIT: Once = Once::new();
            INIT.call_once(|| {
                log::set_logger(&LOGGER).expect("logger já instalado");
                log::set_max_level(log::LevelFilter::Trace);
            });
            ENTRIES.with(|e| e.borrow_mut().clear());
        }

        pub fn take() -> Vec<Entry> {
            ENTRIES.with(|e| std::mem::take(&mut *e.borrow_mut()))
        }

        pub fn expected() -> Entry {
            (
                Level::Info,
                "FQHelper".to_string(),
                "Hello from C in Xposed module!".to_string(),
            )
        }
    }
}
