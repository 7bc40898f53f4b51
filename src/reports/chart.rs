//! Per-day chart series
//!
//! One point per distinct transaction date, oldest first. Each point keeps
//! the income and expense sums and the descriptions behind them; the point
//! kind decides the tick color on the date axis.

use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use crate::models::{CanonicalDate, Money, Transaction};

/// What kind of activity a day had
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    IncomeOnly,
    ExpenseOnly,
    Mixed,
}

impl PointKind {
    /// Tick color on the date axis
    pub fn tick_color(&self) -> &'static str {
        match self {
            Self::IncomeOnly => "#00cc00",
            Self::ExpenseOnly => "#ff0000",
            Self::Mixed => "#ffffff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub date: CanonicalDate,
    pub income: Money,
    /// Magnitude of the day's expenses
    pub expenses: Money,
    pub income_descriptions: Vec<String>,
    pub expense_descriptions: Vec<String>,
}

impl ChartPoint {
    fn new(date: CanonicalDate) -> Self {
        Self {
            date,
            income: Money::zero(),
            expenses: Money::zero(),
            income_descriptions: Vec::new(),
            expense_descriptions: Vec::new(),
        }
    }

    pub fn kind(&self) -> PointKind {
        match (self.income.is_positive(), self.expenses.is_positive()) {
            (true, false) => PointKind::IncomeOnly,
            (false, true) => PointKind::ExpenseOnly,
            _ => PointKind::Mixed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn generate(transactions: &[Transaction]) -> Self {
        let mut by_date: BTreeMap<CanonicalDate, ChartPoint> = BTreeMap::new();
        for txn in transactions {
            let point = by_date
                .entry(txn.date)
                .or_insert_with(|| ChartPoint::new(txn.date));
            if txn.is_income() {
                point.income += txn.magnitude();
                point.income_descriptions.push(txn.description.clone());
            } else {
                point.expenses += txn.magnitude();
                point.expense_descriptions.push(txn.description.clone());
            }
        }
        Self {
            points: by_date.into_values().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest single-day value, for scaling
    pub fn max_value(&self) -> Money {
        self.points
            .iter()
            .map(|p| p.income.max(p.expenses))
            .max()
            .unwrap_or_default()
    }
}

const AXIS_SUFFIXES: [(u32, &str); 7] = [
    (21, "E21"),
    (18, "Qi"),
    (15, "Q"),
    (12, "T"),
    (9, "B"),
    (6, "M"),
    (3, "K"),
];

/// Compact axis label: `1.5K`, `2.0M`, ... with one decimal; plain integer
/// below one thousand
pub fn compact_amount(value: Decimal) -> String {
    for (exponent, suffix) in AXIS_SUFFIXES {
        let threshold = Decimal::from_i128_with_scale(10i128.pow(exponent), 0);
        if value >= threshold {
            let mut scaled =
                (value / threshold).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            scaled.rescale(1);
            return format!("{}{}", scaled, suffix);
        }
    }
    let mut whole = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    whole.rescale(0);
    whole.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use rust_decimal_macros::dec;

    fn txn(day: u32, desc: &str, cents: i64) -> Transaction {
        let kind = if cents >= 0 {
            TransactionType::Income
        } else {
            TransactionType::Expense
        };
        Transaction::new(
            CanonicalDate::from_ymd(2024, 6, day).unwrap(),
            desc,
            Money::from_cents(cents),
            kind,
        )
    }

    #[test]
    fn test_points_sorted_and_classified() {
        let txns = vec![
            txn(12, "Coffee", -350),
            txn(3, "Salary", 200_000),
            txn(12, "Refund", 1_000),
            txn(20, "Rent", -90_000),
        ];
        let series = ChartSeries::generate(&txns);

        let days: Vec<_> = series.points.iter().map(|p| p.date.day()).collect();
        assert_eq!(days, vec![3, 12, 20]);

        assert_eq!(series.points[0].kind(), PointKind::IncomeOnly);
        assert_eq!(series.points[1].kind(), PointKind::Mixed);
        assert_eq!(series.points[2].kind(), PointKind::ExpenseOnly);
        assert_eq!(series.points[2].kind().tick_color(), "#ff0000");

        assert_eq!(series.points[1].income_descriptions, vec!["Refund"]);
        assert_eq!(series.points[1].expense_descriptions, vec!["Coffee"]);
        assert_eq!(series.points[1].expenses, Money::from_cents(350));
        assert_eq!(series.max_value(), Money::from_cents(200_000));
    }

    #[test]
    fn test_empty_series() {
        let series = ChartSeries::generate(&[]);
        assert!(series.is_empty());
        assert_eq!(series.max_value(), Money::zero());
    }

    #[test]
    fn test_compact_amount() {
        assert_eq!(compact_amount(dec!(999)), "999");
        assert_eq!(compact_amount(dec!(12.6)), "13");
        assert_eq!(compact_amount(dec!(1000)), "1.0K");
        assert_eq!(compact_amount(dec!(1550)), "1.6K");
        assert_eq!(compact_amount(dec!(2500000)), "2.5M");
        assert_eq!(compact_amount(dec!(3000000000)), "3.0B");
        assert_eq!(compact_amount(dec!(1000000000000000000000)), "1.0E21");
    }
}
