//! Display formatting for terminal output
//!
//! Turns service snapshots and report values into tables and text blocks.

pub mod note;
pub mod report;
pub mod transaction;

pub use note::format_note_list;
pub use report::{format_archive, format_bar, format_chart, format_period_report};
pub use transaction::{format_ledger, format_transaction_details, format_transaction_table};
