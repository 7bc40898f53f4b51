//! CLI commands for data export

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::backend::Backend;
use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::export::export_transactions_csv;
use crate::services::{SettingsService, TransactionService};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export transactions to CSV
    Transactions {
        /// Output file path
        output: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(
    backend: &dyn Backend,
    paths: &LedgerPaths,
    cmd: ExportCommands,
) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Transactions { output } => {
            let settings = SettingsService::load(backend, paths)?;
            let service = TransactionService::load(backend)?;

            let file = File::create(&output).map_err(|e| {
                LedgerError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);

            export_transactions_csv(
                service.transactions(),
                &mut writer,
                settings.date_format(),
                settings.settings().rounding,
            )?;

            println!(
                "Exported {} transactions to: {}",
                service.transactions().len(),
                output.display()
            );
        }
    }

    Ok(())
}
