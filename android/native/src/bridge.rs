use fqhelper_log::{LogRecord, LogSink, Priority, LOG_TAG};

/// Mensagem emitida a cada chamada de `NativeLib.doSomething()`.
pub const BRIDGE_MESSAGE: &str = "Hello from C in Xposed module!";

/// Ponte de log chamada pelo módulo Xposed.
///
/// Não guarda estado: cada chamada escreve um único registro no sink e volta.
#[derive(Debug, Default, Clone)]
pub struct LogBridge<S> {
    sink: S,
}

impl<S: LogSink> LogBridge<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Emite o registro `I/FQHelper: Hello from C in Xposed module!`.
    pub fn do_something(&self) {
        self.sink.write(Priority::Info, LOG_TAG, BRIDGE_MESSAGE);
    }
}

/// O registro que `do_something` produz.
pub fn expected_record() -> LogRecord {
    LogRecord::new(Priority::Info, LOG_TAG, BRIDGE_MESSAGE)
}
