use anyhow::Result;
use fqhelper::bridge::{expected_record, LogBridge};
use fqhelper_log::{LogRecord, LogSink, MemorySink, StdoutSink};
use serde::Serialize;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePlan {
    pub count: usize,
    pub threads: usize,
}

impl ProbePlan {
    /// Total de registros esperado; `None` se a conta estoura.
    pub fn total(&self) -> Option<usize> {
        self.count.checked_mul(self.threads)
    }
}

#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub records: Vec<LogRecord>,
    pub total: usize,
}

/// Chama a ponte `count` vezes em cada uma das `threads` threads.
fn drive<S: LogSink>(bridge: &LogBridge<S>, plan: ProbePlan) {
    thread::scope(|s| {
        for _ in 0..plan.threads {
            s.spawn(|| {
                for _ in 0..plan.count {
                    bridge.do_something();
                }
            });
        }
    });
}

/// Executa o plano capturando em memória e confere o contrato da ponte.
pub fn run_captured(plan: ProbePlan) -> Result<ProbeReport> {
    let Some(expected_total) = plan.total() else {
        anyhow::bail!(
            "plano grande demais: {} chamadas x {} threads",
            plan.count,
            plan.threads
        );
    };

    let sink = MemorySink::new();
    drive(&LogBridge::new(&sink), plan);

    let records = sink.records();
    if records.len() != expected_total {
        anyhow::bail!(
            "esperava {expected_total} registros, a ponte emitiu {}",
            records.len()
        );
    }

    let expected = expected_record();
    if let Some((i, bad)) = records.iter().enumerate().find(|(_, r)| **r != expected) {
        anyhow::bail!("registro {i} diferente do esperado: {bad}");
    }

    let total = records.len();
    Ok(ProbeReport { records, total })
}

/// Executa o plano escrevendo direto no stdout.
pub fn run_live(plan: ProbePlan) {
    drive(&LogBridge::new(StdoutSink), plan);
}
