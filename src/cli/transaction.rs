//! Transaction CLI commands
//!
//! Implements CLI commands for the ledger: entry management plus the
//! summary and chart views over a date range.

use clap::{Subcommand, ValueEnum};

use super::RangeArgs;
use crate::backend::Backend;
use crate::config::paths::LedgerPaths;
use crate::display::{format_chart, format_ledger, format_transaction_details};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CanonicalDate, TransactionId, TransactionType};
use crate::reports::{ChartSeries, Summary};
use crate::services::{MonthNavigator, SettingsService, TransactionForm, TransactionService};

/// Transaction direction as typed on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Kind {
    Income,
    Expense,
}

impl From<Kind> for TransactionType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Income => TransactionType::Income,
            Kind::Expense => TransactionType::Expense,
        }
    }
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Description
        description: String,
        /// Amount as a positive number, e.g. "42.50"
        amount: String,
        /// Income or expense
        #[arg(short = 't', long = "type", value_enum, default_value = "expense")]
        kind: Kind,
        /// Date in the configured display format, defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions in a date range
    List {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: TransactionId,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New type
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<Kind>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: TransactionId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Income, expenses and balance for a date range
    Summary {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Per-day income and expense chart for a date range
    Chart {
        #[command(flatten)]
        range: RangeArgs,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    backend: &dyn Backend,
    paths: &LedgerPaths,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let settings = SettingsService::load(backend, paths)?;
    let config = settings.report_config();
    let format = config.date_format;
    let mut service = TransactionService::load(backend)?;
    let mut navigator = MonthNavigator::current();

    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            kind,
            date,
        } => {
            let form = TransactionForm {
                description,
                amount,
                date: date.unwrap_or_else(|| CanonicalDate::today().to_display(format)),
                transaction_type: kind.into(),
            };
            service.add(&form, format)?;

            // The new entry has the highest id
            if let Some(txn) = service.transactions().iter().max_by_key(|t| t.id) {
                println!("Created transaction:");
                print!("{}", format_transaction_details(txn, &config));
            }
        }

        TransactionCommands::List { range } => {
            let range = range.resolve(&mut navigator, format)?;
            let transactions = service.in_range(&range);
            let (start, end) = range.display(format);
            println!("{} - {}", start, end);
            println!();
            print!("{}", format_ledger(&transactions, &config));
            println!("\nShowing {} transactions", transactions.len());
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .get(id)
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
            print!("{}", format_transaction_details(txn, &config));
        }

        TransactionCommands::Edit {
            id,
            description,
            amount,
            kind,
            date,
        } => {
            let existing = service
                .get(id)
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
            let mut form = TransactionForm::from_transaction(existing, format);
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(amount) = amount {
                form.amount = amount;
            }
            if let Some(kind) = kind {
                form.transaction_type = kind.into();
            }
            if let Some(date) = date {
                form.date = date;
            }

            service.update(id, &form, format)?;
            if let Some(updated) = service.get(id) {
                println!("Updated transaction:");
                print!("{}", format_transaction_details(updated, &config));
            }
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service
                .get(id)
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?
                .clone();

            if !force {
                println!("{}", settings.translator().t("transaction_list.delete_confirm"));
                print!("{}", format_transaction_details(&txn, &config));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.delete(id)?;
            println!("Deleted transaction: {} ({} {})", id, txn.date, txn.description);
        }

        TransactionCommands::Summary { range } => {
            let range = range.resolve(&mut navigator, format)?;
            let summary = Summary::generate(&service.in_range(&range));
            print!("{}", summary.format_terminal(&config));
        }

        TransactionCommands::Chart { range } => {
            let range = range.resolve(&mut navigator, format)?;
            let series = ChartSeries::generate(&service.in_range(&range));
            print!("{}", format_chart(&series, &config));
        }
    }

    Ok(())
}
