mod probe;

use crate::probe::{ProbePlan, ProbeReport};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "fqhelper-probe",
    about = "Chama a ponte de log do FQHelper no host e mostra o que foi emitido"
)]
struct Args {
    /// Chamadas por thread
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Número de threads chamando a ponte ao mesmo tempo
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    threads: u16,

    /// Formato da saída capturada
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Escreve direto no stdout em vez de capturar e conferir
    #[arg(long, conflicts_with = "format")]
    live: bool,
}

impl Args {
    fn plan(&self) -> ProbePlan {
        ProbePlan {
            count: self.count,
            threads: usize::from(self.threads),
        }
    }
}

fn print_report(report: &ProbeReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for record in &report.records {
                println!("{record}");
            }
            println!("> {} registro(s) conferido(s).", report.total);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let plan = args.plan();

    if args.live {
        // Sem captura: só repassa para o stdout
        probe::run_live(plan);
        return Ok(());
    }

    let report = probe::run_captured(plan)?;
    print_report(&report, args.format)
}
