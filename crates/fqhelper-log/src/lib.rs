//! Canal de log do FQHelper.
//!
//! Define o modelo de prioridades do Android, o trait `LogSink` usado pela
//! ponte nativa e os sinks concretos (liblog, memória e stdout).

mod sink;

pub use sink::{LogSink, MemorySink, PlatformSink, StdoutSink};

use serde::Serialize;
use std::fmt;

/// Tag usada em todos os registros do módulo (igual ao lado Java).
pub const LOG_TAG: &str = "FQHelper";

/// Prioridade de log, com os mesmos valores de `android_LogPriority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum Priority {
    Verbose = 2,
    Debug = 3,
    Info = 4,
    Warn = 5,
    Error = 6,
    Fatal = 7,
}

impl Priority {
    /// Valor numérico passado para a liblog.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Letra usada pelo logcat no formato "brief".
    pub fn letter(self) -> char {
        match self {
            Priority::Verbose => 'V',
            Priority::Debug => 'D',
            Priority::Info => 'I',
            Priority::Warn => 'W',
            Priority::Error => 'E',
            Priority::Fatal => 'F',
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            Priority::Verbose => log::Level::Trace,
            Priority::Debug => log::Level::Debug,
            Priority::Info => log::Level::Info,
            Priority::Warn => log::Level::Warn,
            // `log` não tem nível fatal
            Priority::Error | Priority::Fatal => log::Level::Error,
        }
    }
}

impl From<log::Level> for Priority {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Priority::Verbose,
            log::Level::Debug => Priority::Debug,
            log::Level::Info => Priority::Info,
            log::Level::Warn => Priority::Warn,
            log::Level::Error => Priority::Error,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Serialize for Priority {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.letter())
    }
}

/// Um registro já emitido para um sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub priority: Priority,
    pub tag: String,
    pub message: String,
}

impl LogRecord {
    pub fn new(priority: Priority, tag: &str, message: &str) -> Self {
        LogRecord {
            priority,
            tag: tag.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}: {}", self.priority, self.tag, self.message)
    }
}

/// Instala o logger do processo uma única vez.
///
/// No Android usa `android_logger` com a tag do módulo; nas outras
/// plataformas não faz nada e deixa o host escolher o logger.
pub fn init_logging() {
    #[cfg(target_os = "android")]
    {
        let max_level = if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(max_level)
                .with_tag(LOG_TAG),
        );
    }
}
