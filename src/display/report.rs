//! Report formatting for terminal output
//!
//! Period totals as a table, the per-day chart as horizontal bars and the
//! month archive as nested year / month sections.

use rust_decimal::prelude::ToPrimitive;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::i18n::Translator;
use crate::models::Money;
use crate::reports::{compact_amount, ChartSeries, PeriodReport, PeriodTotal, PointKind, ReportConfig};
use crate::services::ArchiveYear;

const BAR_WIDTH: usize = 30;

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "Period")]
    label: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Net")]
    net: String,
}

fn period_table(rows: &[PeriodTotal], config: &ReportConfig) -> String {
    let rows: Vec<_> = rows
        .iter()
        .map(|p| PeriodRow {
            label: p.label.clone(),
            income: config.amount(p.income),
            expenses: config.amount(p.expenses),
            net: p.net().format_with_symbol(&config.currency_symbol, config.rounding),
        })
        .collect();
    Table::new(rows).with(Style::psql()).to_string()
}

/// Monthly then weekly totals
pub fn format_period_report(report: &PeriodReport, config: &ReportConfig) -> String {
    let t = Translator::new(config.language);
    if report.monthly.is_empty() {
        return format!("{}\n", t.t("chart.no_transactions"));
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n", t.t("report.monthly")));
    output.push_str(&period_table(&report.monthly, config));
    output.push_str("\n\n");
    output.push_str(&format!("{}\n", t.t("report.weekly")));
    output.push_str(&period_table(&report.weekly, config));
    output.push('\n');
    output
}

/// Bar proportional to `value / max`, padded to `width`
pub fn format_bar(value: Money, max: Money, width: usize) -> String {
    if !max.is_positive() || !value.is_positive() {
        return " ".repeat(width);
    }
    let ratio = (value.amount() / max.amount()).to_f64().unwrap_or(0.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn marker(kind: PointKind) -> &'static str {
    match kind {
        PointKind::IncomeOnly => "+",
        PointKind::ExpenseOnly => "-",
        PointKind::Mixed => "±",
    }
}

/// One line per day and side, scaled to the largest day
pub fn format_chart(series: &ChartSeries, config: &ReportConfig) -> String {
    let t = Translator::new(config.language);
    if series.is_empty() {
        return format!("{}\n", t.t("chart.no_transactions"));
    }

    let max = series.max_value();
    let mut output = String::new();
    output.push_str(&format!(
        "{}  (max {}{})\n",
        t.t("chart.title"),
        config.currency_symbol,
        compact_amount(max.amount())
    ));
    output.push_str(&"─".repeat(BAR_WIDTH + 40));
    output.push('\n');

    for point in &series.points {
        let date = point.date.to_display(config.date_format);
        if point.income.is_positive() {
            output.push_str(&format!(
                "{} {:<10} {} {:>12}  {}\n",
                marker(point.kind()),
                date,
                format_bar(point.income, max, BAR_WIDTH),
                config.amount(point.income),
                point.income_descriptions.join(", ")
            ));
        }
        if point.expenses.is_positive() {
            output.push_str(&format!(
                "{} {:<10} {} {:>12}  {}\n",
                marker(point.kind()),
                date,
                format_bar(point.expenses, max, BAR_WIDTH),
                format!("-{}", config.amount(point.expenses)),
                point.expense_descriptions.join(", ")
            ));
        }
    }
    output
}

/// Year sections, each month with its income and expense lists
pub fn format_archive(years: &[ArchiveYear], config: &ReportConfig) -> String {
    let t = Translator::new(config.language);
    if years.is_empty() {
        return format!("{}\n", t.t("archive.no_selection"));
    }

    let mut output = String::new();
    for year in years {
        output.push_str(&format!("{}\n", year.year));
        output.push_str(&"═".repeat(40));
        output.push('\n');

        for month in &year.months {
            let name = month
                .month_number
                .map(|m| t.month_name(m))
                .unwrap_or_else(|| month.month.clone());
            output.push_str(&format!("{} ({})\n", name, month.month));

            output.push_str(&format!("  {}\n", t.t("transaction_list.income")));
            if month.income.is_empty() {
                output.push_str(&format!("    {}\n", t.t("transaction_list.no_income_transactions")));
            }
            for txn in &month.income {
                output.push_str(&format!(
                    "    {} - {}  {}\n",
                    txn.description,
                    txn.date.to_display(config.date_format),
                    config.amount(txn.amount)
                ));
            }

            output.push_str(&format!("  {}\n", t.t("transaction_list.expenses")));
            if month.expenses.is_empty() {
                output.push_str(&format!("    {}\n", t.t("transaction_list.no_expense_transactions")));
            }
            for txn in &month.expenses {
                output.push_str(&format!(
                    "    {} - {}  -{}\n",
                    txn.description,
                    txn.date.to_display(config.date_format),
                    config.amount(txn.amount)
                ));
            }
            output.push('\n');
        }
    }
    output
}
