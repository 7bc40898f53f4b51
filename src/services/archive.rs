//! Archive service
//!
//! Browses the ledger by year and month using the days index, and turns a
//! selected year or month into an [`ExportRequest`] for the document
//! builder.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::backend::Backend;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_archive, DocumentRenderer, RenderedDocument};
use crate::models::{Day, ExportRequest, ExportScope, LetterheadInfo, MonthGroup, Transaction};
use crate::reports::{aggregate_month, group_by_month, AggregatedMonth, DocumentBuilder};

/// One side of the archive filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    fn matches_year(&self, year: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted.trim() == year,
        }
    }

    /// Months compare numerically so "7" selects "07"
    fn matches_month(&self, month: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => match (wanted.trim().parse::<u32>(), month.parse::<u32>()) {
                (Ok(a), Ok(b)) => a == b,
                _ => wanted.trim() == month,
            },
        }
    }
}

impl FromStr for Selection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_string()))
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Only(value) => write!(f, "{}", value),
        }
    }
}

/// Year and month filter for the archive view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchiveFilter {
    pub year: Selection,
    pub month: Selection,
}

/// One year of the archive view, months most recent first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveYear {
    pub year: String,
    pub months: Vec<AggregatedMonth>,
}

/// Service for the month archive
pub struct ArchiveService<'a> {
    backend: &'a dyn Backend,
    transactions: Vec<Transaction>,
    days: Vec<Day>,
}

impl<'a> ArchiveService<'a> {
    pub fn load(backend: &'a dyn Backend) -> LedgerResult<Self> {
        let mut service = Self {
            backend,
            transactions: Vec::new(),
            days: Vec::new(),
        };
        service.refresh()?;
        Ok(service)
    }

    /// Reload transactions and the days index together
    pub fn refresh(&mut self) -> LedgerResult<()> {
        let transactions = self.backend.get_transactions()?;
        let days = self.backend.get_days()?;
        debug!(
            transactions = transactions.len(),
            days = days.len(),
            "loaded archive"
        );
        self.transactions = transactions;
        self.days = days;
        Ok(())
    }

    /// Years with at least one transaction, ascending
    pub fn years(&self) -> Vec<String> {
        self.days
            .iter()
            .map(|d| d.year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|y| format!("{:04}", y))
            .collect()
    }

    /// Month numbers with at least one transaction in any year, ascending
    pub fn months(&self) -> Vec<String> {
        self.days
            .iter()
            .map(|d| d.month())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|m| format!("{:02}", m))
            .collect()
    }

    /// Every (year, month) of the days index with its transactions
    fn month_groups(&self) -> Vec<MonthGroup> {
        let mut groups: BTreeMap<(i32, u32), MonthGroup> = BTreeMap::new();
        for day in &self.days {
            let group = groups.entry((day.year(), day.month())).or_insert_with(|| {
                MonthGroup::new(format!("{:04}", day.year()), format!("{:02}", day.month()))
            });
            group.transactions.extend(
                self.transactions
                    .iter()
                    .filter(|t| t.date == day.date)
                    .cloned(),
            );
        }
        groups.into_values().collect()
    }

    /// Filtered archive grouped by year (descending), months descending
    pub fn view(&self, filter: &ArchiveFilter) -> Vec<ArchiveYear> {
        let mut years: BTreeMap<String, Vec<AggregatedMonth>> = BTreeMap::new();
        for group in self.month_groups() {
            if filter.year.matches_year(&group.year) && filter.month.matches_month(&group.month) {
                years
                    .entry(group.year.clone())
                    .or_default()
                    .push(aggregate_month(&group));
            }
        }

        years
            .into_iter()
            .rev()
            .map(|(year, mut months)| {
                months.reverse();
                ArchiveYear { year, months }
            })
            .collect()
    }

    /// Normalize a user-supplied scope to the stored year and month form
    pub fn scope(&self, year: &str, month: Option<&str>) -> LedgerResult<ExportScope> {
        let year_num: i32 = year
            .trim()
            .parse()
            .map_err(|_| LedgerError::Validation(format!("Invalid year: {}", year)))?;
        let year = format!("{:04}", year_num);

        match month {
            None => Ok(ExportScope::year(year)),
            Some(raw) => {
                let month_num = raw
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .ok_or_else(|| LedgerError::Validation(format!("Invalid month: {}", raw)))?;
                Ok(ExportScope::month(year, format!("{:02}", month_num)))
            }
        }
    }

    /// Month groups for a year or a single month, ascending
    pub fn export_request(&self, scope: ExportScope) -> ExportRequest {
        let indexed: BTreeSet<_> = self.days.iter().map(|d| d.date).collect();
        let in_index: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| indexed.contains(&t.date))
            .cloned()
            .collect();
        let months = group_by_month(&in_index, &scope);
        ExportRequest::new(scope, months)
    }

    /// Build and render the archive document for a scope
    pub fn export<R>(
        &self,
        renderer: &mut R,
        builder: &DocumentBuilder,
        scope: ExportScope,
        letterhead: &LetterheadInfo,
    ) -> LedgerResult<RenderedDocument>
    where
        R: DocumentRenderer + ?Sized,
    {
        let request = self.export_request(scope);
        info!(
            year = %request.year,
            month = ?request.month,
            months = request.months.len(),
            "exporting archive"
        );
        export_archive(renderer, builder, &request, letterhead)
    }
}
