//! Reports module for Ledgerbook
//!
//! Aggregation of transactions into month groups, the archive document
//! builder, the ledger summary with period totals, and the chart series.

pub mod aggregate;
pub mod chart;
pub mod document;
pub mod summary;

pub use aggregate::{aggregate_month, aggregate_request, group_by_month, AggregatedMonth, Totals};
pub use chart::{compact_amount, ChartPoint, ChartSeries, PointKind};
pub use document::{DocumentBuilder, DocumentDefinition, ReportConfig};
pub use summary::{filter_by_range, PeriodReport, PeriodTotal, Summary};
