//! Report CLI commands

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::backend::Backend;
use crate::config::paths::LedgerPaths;
use crate::display::format_period_report;
use crate::error::{LedgerError, LedgerResult};
use crate::reports::PeriodReport;
use crate::services::{SettingsService, TransactionService};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Monthly and weekly income / expense totals over the whole ledger
    Periods {
        /// Write the totals as CSV instead of printing tables
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    backend: &dyn Backend,
    paths: &LedgerPaths,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let config = SettingsService::load(backend, paths)?.report_config();
    let service = TransactionService::load(backend)?;

    match cmd {
        ReportCommands::Periods { csv } => {
            let report = PeriodReport::generate(service.transactions());
            match csv {
                Some(output) => {
                    let file = File::create(&output).map_err(|e| {
                        LedgerError::Export(format!(
                            "Failed to create file {}: {}",
                            output.display(),
                            e
                        ))
                    })?;
                    report.export_csv(BufWriter::new(file), &config)?;
                    println!("Period totals exported to: {}", output.display());
                }
                None => print!("{}", format_period_report(&report, &config)),
            }
        }
    }

    Ok(())
}
