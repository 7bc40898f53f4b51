//! Ledger summary and period totals
//!
//! `Summary` is the income / expenses / balance box shown above the ledger.
//! `PeriodReport` lists monthly and ISO-weekly totals.

use chrono::Datelike;
use std::collections::BTreeMap;

use super::aggregate::Totals;
use super::document::ReportConfig;
use crate::i18n::Translator;
use crate::models::{DateRange, Money, Transaction};

/// Transactions whose date falls inside an inclusive range
pub fn filter_by_range(transactions: &[Transaction], range: &DateRange) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| range.contains(t.date.date()))
        .cloned()
        .collect()
}

/// Income, expenses and balance over a slice of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub income: Money,
    /// Magnitude of all expenses
    pub expenses: Money,
    pub balance: Money,
    pub transaction_count: usize,
}

impl Summary {
    pub fn generate(transactions: &[Transaction]) -> Self {
        let totals = Totals::of(transactions);
        Self {
            income: totals.income,
            expenses: totals.expenses,
            balance: totals.net,
            transaction_count: transactions.len(),
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, config: &ReportConfig) -> String {
        let t = Translator::new(config.language);
        let mut output = String::new();
        output.push_str(&format!("{}\n", t.t("summary.title")));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            t.t("summary.income"),
            config.amount(self.income)
        ));
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            t.t("summary.expenses"),
            config.amount(self.expenses)
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            t.t("summary.balance"),
            self.balance
                .format_with_symbol(&config.currency_symbol, config.rounding)
        ));
        output
    }
}

/// Totals for one calendar month or ISO week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTotal {
    /// `yyyy-mm` or `yyyy-Www`
    pub label: String,
    pub income: Money,
    pub expenses: Money,
}

impl PeriodTotal {
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Monthly and weekly totals, both sorted ascending
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeriodReport {
    pub monthly: Vec<PeriodTotal>,
    pub weekly: Vec<PeriodTotal>,
}

fn collect_totals<F>(transactions: &[Transaction], label_of: F) -> Vec<PeriodTotal>
where
    F: Fn(&Transaction) -> String,
{
    let mut buckets: BTreeMap<String, (Money, Money)> = BTreeMap::new();
    for txn in transactions {
        let entry = buckets.entry(label_of(txn)).or_default();
        if txn.is_income() {
            entry.0 += txn.magnitude();
        } else {
            entry.1 += txn.magnitude();
        }
    }
    buckets
        .into_iter()
        .map(|(label, (income, expenses))| PeriodTotal {
            label,
            income,
            expenses,
        })
        .collect()
}

impl PeriodReport {
    pub fn generate(transactions: &[Transaction]) -> Self {
        let monthly = collect_totals(transactions, |t| {
            format!("{:04}-{:02}", t.date.year(), t.date.month())
        });
        let weekly = collect_totals(transactions, |t| {
            let week = t.date.date().iso_week();
            format!("{:04}-W{:02}", week.year(), week.week())
        });
        Self { monthly, weekly }
    }

    /// Export both tables as CSV rows: kind, period, income, expenses, net
    pub fn export_csv<W: std::io::Write>(
        &self,
        writer: W,
        config: &ReportConfig,
    ) -> crate::error::LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Kind", "Period", "Income", "Expenses", "Net"])?;
        for (kind, rows) in [("monthly", &self.monthly), ("weekly", &self.weekly)] {
            for row in rows {
                csv.write_record([
                    kind.to_string(),
                    row.label.clone(),
                    row.income.format_fixed(config.rounding),
                    row.expenses.format_fixed(config.rounding),
                    row.net().format_fixed(config.rounding),
                ])?;
            }
        }
        csv.flush()?;
        Ok(())
    }
}
