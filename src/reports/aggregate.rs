//! Aggregation of transactions into month groups
//!
//! Groups a flat transaction list by year and month, sorts each month by
//! date (most recent first), splits it into income and expenses and totals
//! both sides. Totals keep full decimal precision; rounding happens only
//! when an amount is printed.

use std::collections::BTreeMap;

use crate::models::{ExportRequest, ExportScope, Money, MonthGroup, Transaction};

/// Income, expense and net totals of a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    /// Sum of income magnitudes
    pub income: Money,
    /// Sum of expense magnitudes (non-negative)
    pub expenses: Money,
    /// `income - expenses`
    pub net: Money,
}

impl Totals {
    pub fn of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut income = Money::zero();
        let mut expenses = Money::zero();
        for txn in transactions {
            if txn.is_income() {
                income += txn.magnitude();
            } else {
                expenses += txn.magnitude();
            }
        }
        Self {
            income,
            expenses,
            net: income - expenses,
        }
    }

    pub fn is_non_negative(&self) -> bool {
        !self.net.is_negative()
    }
}

/// One month after sorting and partitioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedMonth {
    pub year: String,
    pub month: String,
    /// Month in 1..=12, if the group's month string was valid
    pub month_number: Option<u32>,
    /// Date descending
    pub income: Vec<Transaction>,
    /// Date descending
    pub expenses: Vec<Transaction>,
    pub totals: Totals,
}

/// Stable sort, most recent first; same-day entries keep their order
pub fn sort_date_descending(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Split into (income, expenses), preserving order
pub fn partition(transactions: Vec<Transaction>) -> (Vec<Transaction>, Vec<Transaction>) {
    transactions.into_iter().partition(|t| t.is_income())
}

/// Sort, partition and total one month
pub fn aggregate_month(group: &MonthGroup) -> AggregatedMonth {
    let mut sorted = group.transactions.clone();
    sort_date_descending(&mut sorted);
    let totals = Totals::of(&sorted);
    let (income, expenses) = partition(sorted);

    AggregatedMonth {
        year: group.year.clone(),
        month: group.month.clone(),
        month_number: group.month_number(),
        income,
        expenses,
        totals,
    }
}

/// Aggregate every non-empty month of a request, keeping the request's order
pub fn aggregate_request(request: &ExportRequest) -> Vec<AggregatedMonth> {
    request
        .months
        .iter()
        .filter(|m| !m.is_empty())
        .map(aggregate_month)
        .collect()
}

fn scope_matches(scope: &ExportScope, txn: &Transaction) -> bool {
    let year_ok = scope
        .year
        .trim()
        .parse::<i32>()
        .map(|y| y == txn.date.year())
        .unwrap_or(false);
    let month_ok = match &scope.month {
        Some(month) => month
            .trim()
            .parse::<u32>()
            .map(|m| m == txn.date.month())
            .unwrap_or(false),
        None => true,
    };
    year_ok && month_ok
}

/// Group the transactions inside a scope into months, ascending by month.
/// Months without transactions are not produced.
pub fn group_by_month(transactions: &[Transaction], scope: &ExportScope) -> Vec<MonthGroup> {
    let mut months: BTreeMap<u32, Vec<Transaction>> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| scope_matches(scope, t)) {
        months.entry(txn.date.month()).or_default().push(txn.clone());
    }

    months
        .into_iter()
        .map(|(month, transactions)| MonthGroup {
            year: scope.year.trim().to_string(),
            month: format!("{:02}", month),
            transactions,
        })
        .collect()
}
