//! Month navigation for the ledger view
//!
//! Tracks how many months the visible range sits before the current month
//! (positive values move into the past) and produces the date range to
//! filter by.

use chrono::NaiveDate;

use crate::models::{CanonicalDate, DateRange, MonthPeriod};

/// Furthest the navigator moves in either direction, in months
pub const MAX_MONTH_OFFSET: i32 = 1200;

/// Month-by-month navigation relative to a fixed "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthNavigator {
    today: NaiveDate,
    offset: i32,
}

impl MonthNavigator {
    /// Navigator anchored at a given day, showing its month
    pub fn new(today: NaiveDate) -> Self {
        Self { today, offset: 0 }
    }

    /// Navigator anchored at the local date
    pub fn current() -> Self {
        Self::new(CanonicalDate::today().date())
    }

    /// Navigator positioned at the month a range starts in
    pub fn for_range(today: NaiveDate, range: &DateRange) -> Self {
        let mut navigator = Self::new(today);
        navigator.sync_to(range);
        navigator
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn today_date(&self) -> NaiveDate {
        self.today
    }

    /// Month currently shown
    pub fn month(&self) -> MonthPeriod {
        MonthPeriod::of(self.today).offset(-self.offset)
    }

    pub fn can_go_back(&self) -> bool {
        self.offset < MAX_MONTH_OFFSET
    }

    pub fn can_go_forward(&self) -> bool {
        self.offset > -MAX_MONTH_OFFSET
    }

    /// Step one month back; `None` at the bound
    pub fn previous(&mut self) -> Option<DateRange> {
        if !self.can_go_back() {
            return None;
        }
        self.offset += 1;
        Some(self.month().range())
    }

    /// Step one month forward; `None` at the bound
    pub fn next(&mut self) -> Option<DateRange> {
        if !self.can_go_forward() {
            return None;
        }
        self.offset -= 1;
        Some(self.month().range())
    }

    /// Jump straight to a month offset, clamped to the bound
    pub fn jump_to(&mut self, offset: i32) -> DateRange {
        self.offset = offset.clamp(-MAX_MONTH_OFFSET, MAX_MONTH_OFFSET);
        self.month().range()
    }

    /// The whole current month
    pub fn this_month(&mut self) -> DateRange {
        self.offset = 0;
        self.month().range()
    }

    /// Only today
    pub fn today(&mut self) -> DateRange {
        self.offset = 0;
        DateRange::day(self.today)
    }

    /// A range typed in by hand; navigation restarts from the current month
    pub fn set_manual(&mut self, range: DateRange) -> DateRange {
        self.offset = 0;
        range
    }

    /// Re-derive the offset from where a range starts
    pub fn sync_to(&mut self, range: &DateRange) {
        let offset = MonthPeriod::of(self.today).months_since(&MonthPeriod::of(range.start));
        self.offset = offset.clamp(-MAX_MONTH_OFFSET, MAX_MONTH_OFFSET);
    }
}

impl Default for MonthNavigator {
    fn default() -> Self {
        Self::current()
    }
}
