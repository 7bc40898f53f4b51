//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod archive;
pub mod export;
pub mod note;
pub mod report;
pub mod settings;
pub mod transaction;

pub use archive::{handle_archive_command, ArchiveCommands};
pub use export::{handle_export_command, ExportCommands};
pub use note::{handle_note_command, NoteCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use clap::Args;

use crate::error::LedgerResult;
use crate::models::{DateFormat, DateRange, MonthPeriod};
use crate::services::MonthNavigator;

/// Date range selection shared by the ledger views
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Start date in the configured display format
    #[arg(long)]
    pub from: Option<String>,

    /// End date in the configured display format
    #[arg(long)]
    pub to: Option<String>,

    /// Months before the current one (negative moves forward)
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["from", "to"])]
    pub month_offset: Option<i32>,

    /// The whole current month (default)
    #[arg(long, conflicts_with_all = ["from", "to", "month_offset", "today"])]
    pub this_month: bool,

    /// Only today
    #[arg(long, conflicts_with_all = ["from", "to", "month_offset"])]
    pub today: bool,
}

impl RangeArgs {
    /// Resolve to a concrete range; a missing end of a manual range falls
    /// back to the matching end of the current month
    pub fn resolve(&self, navigator: &mut MonthNavigator, format: DateFormat) -> LedgerResult<DateRange> {
        if self.today {
            return Ok(navigator.today());
        }
        if let Some(offset) = self.month_offset {
            return Ok(navigator.jump_to(offset));
        }
        if self.from.is_none() && self.to.is_none() {
            return Ok(navigator.this_month());
        }

        let current = MonthPeriod::of(navigator.today_date()).range();
        let start = match &self.from {
            Some(raw) => format.parse(raw)?,
            None => current.start,
        };
        let end = match &self.to {
            Some(raw) => format.parse(raw)?,
            None => current.end,
        };
        Ok(navigator.set_manual(DateRange::new(start, end)))
    }
}
