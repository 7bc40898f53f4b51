//! CSV export of the ledger
//!
//! One row per transaction in id order. Amounts are signed, two fraction
//! digits, no currency symbol; dates use the chosen display format.

use std::io::Write;

use crate::error::LedgerResult;
use crate::models::{DateFormat, RoundingPolicy, Transaction};

/// Export transactions to CSV
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
    date_format: DateFormat,
    rounding: RoundingPolicy,
) -> LedgerResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Date", "Description", "Type", "Amount"])?;

    for txn in transactions {
        csv.write_record([
            txn.id.map(|id| id.to_string()).unwrap_or_default(),
            txn.date.to_display(date_format),
            txn.description.clone(),
            txn.transaction_type.to_string(),
            txn.amount.format_fixed(rounding),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
