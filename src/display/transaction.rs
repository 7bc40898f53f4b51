//! Transaction display formatting
//!
//! The ledger is shown as two tables, income then expenses, each most
//! recent first.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::i18n::Translator;
use crate::models::Transaction;
use crate::reports::aggregate::partition;
use crate::reports::ReportConfig;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn row(txn: &Transaction, config: &ReportConfig) -> TransactionRow {
    let amount = config.amount(txn.amount);
    TransactionRow {
        id: txn.id.map(|id| id.to_string()).unwrap_or_default(),
        date: txn.date.to_display(config.date_format),
        description: truncate(&txn.description, 40),
        amount: if txn.is_expense() {
            format!("-{}", amount)
        } else {
            amount
        },
    }
}

/// Format transactions as a plain table
pub fn format_transaction_table(transactions: &[Transaction], config: &ReportConfig) -> String {
    let rows: Vec<_> = transactions.iter().map(|t| row(t, config)).collect();
    Table::new(rows).with(Style::psql()).to_string()
}

/// Format the ledger as an income section and an expense section.
/// Input is expected to be sorted already.
pub fn format_ledger(transactions: &[Transaction], config: &ReportConfig) -> String {
    let t = Translator::new(config.language);
    let (income, expenses) = partition(transactions.to_vec());
    let mut output = String::new();

    output.push_str(&format!("{}\n", t.t("transaction_list.income")));
    if income.is_empty() {
        output.push_str(&format!("  {}\n", t.t("transaction_list.no_income_transactions")));
    } else {
        output.push_str(&format_transaction_table(&income, config));
        output.push('\n');
    }
    output.push('\n');

    output.push_str(&format!("{}\n", t.t("transaction_list.expenses")));
    if expenses.is_empty() {
        output.push_str(&format!("  {}\n", t.t("transaction_list.no_expense_transactions")));
    } else {
        output.push_str(&format_transaction_table(&expenses, config));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, config: &ReportConfig) -> String {
    let mut output = String::new();
    if let Some(id) = txn.id {
        output.push_str(&format!("Transaction: {}\n", id));
    }
    output.push_str(&format!("Date:        {}\n", txn.date.to_display(config.date_format)));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Type:        {}\n", txn.transaction_type));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(&config.currency_symbol, config.rounding)
    ));
    output
}

/// Truncate to a maximum number of characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CanonicalDate, Money, TransactionId, TransactionType};

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(
                CanonicalDate::from_ymd(2024, 7, 20).unwrap(),
                "Groceries",
                Money::from_cents(-4_250),
                TransactionType::Expense,
            )
            .with_id(TransactionId::new(2)),
            Transaction::new(
                CanonicalDate::from_ymd(2024, 7, 1).unwrap(),
                "Salary",
                Money::from_cents(300_000),
                TransactionType::Income,
            )
            .with_id(TransactionId::new(1)),
        ]
    }

    #[test]
    fn test_ledger_sections() {
        let output = format_ledger(&sample(), &ReportConfig::default());
        let income_at = output.find("Income").unwrap();
        let expenses_at = output.find("Expenses").unwrap();
        assert!(income_at < expenses_at);
        assert!(output.contains("€3000.00"));
        assert!(output.contains("-€42.50"));
        assert!(output.contains("20/07/2024"));
    }

    #[test]
    fn test_empty_sections_use_messages() {
        let output = format_ledger(&[], &ReportConfig::default());
        assert!(output.contains("No income transactions"));
        assert!(output.contains("No expense transactions"));
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Müller", 10), "Müller");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }
}
