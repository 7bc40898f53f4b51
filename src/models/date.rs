//! Canonical and display date handling
//!
//! Transactions are stored with a canonical `dd.mm.yyyy` date. The user picks
//! one of two display formats (`dd/mm/yyyy` or `yyyy-mm-dd`); every screen and
//! every printed archive converts through this module.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, LedgerResult};

const CANONICAL_FORMAT: &str = "%d.%m.%Y";

/// User-selectable display format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DateFormat {
    /// `dd/mm/yyyy`
    #[default]
    #[serde(rename = "dd/mm/yyyy")]
    DayMonthYear,
    /// `yyyy-mm-dd`
    #[serde(rename = "yyyy-mm-dd")]
    YearMonthDay,
}

impl DateFormat {
    /// The pattern as shown to users
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::DayMonthYear => "dd/mm/yyyy",
            Self::YearMonthDay => "yyyy-mm-dd",
        }
    }

    /// Suffix used by translation keys, e.g. `dd_mm_yyyy`
    pub fn key_suffix(&self) -> &'static str {
        match self {
            Self::DayMonthYear => "dd_mm_yyyy",
            Self::YearMonthDay => "yyyy_mm_dd",
        }
    }

    /// Format a calendar date in this display format
    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            Self::DayMonthYear => date.format("%d/%m/%Y").to_string(),
            Self::YearMonthDay => date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Parse a display string strictly: exact field widths, real calendar date
    pub fn parse(&self, input: &str) -> LedgerResult<NaiveDate> {
        let input = input.trim();
        let err = || LedgerError::DateParse {
            input: input.to_string(),
            expected: self.pattern(),
        };

        let (sep, widths) = match self {
            Self::DayMonthYear => ('/', [2, 2, 4]),
            Self::YearMonthDay => ('-', [4, 2, 2]),
        };
        let parts: Vec<&str> = input.split(sep).collect();
        if parts.len() != 3 {
            return Err(err());
        }
        for (part, width) in parts.iter().zip(widths) {
            if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
        }

        let nums: Vec<u32> = parts
            .iter()
            .map(|p| p.parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| err())?;
        let (year, month, day) = match self {
            Self::DayMonthYear => (nums[2], nums[1], nums[0]),
            Self::YearMonthDay => (nums[0], nums[1], nums[2]),
        };

        NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(err)
    }
}

impl FromStr for DateFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dd/mm/yyyy" | "dmy" => Ok(Self::DayMonthYear),
            "yyyy-mm-dd" | "ymd" | "iso" => Ok(Self::YearMonthDay),
            other => Err(LedgerError::Validation(format!(
                "Unknown date format '{}'. Use dd/mm/yyyy or yyyy-mm-dd",
                other
            ))),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern())
    }
}

/// A calendar date stored in the canonical `dd.mm.yyyy` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date in local time
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse a canonical `dd.mm.yyyy` string; unpadded day/month are accepted
    pub fn parse(input: &str) -> LedgerResult<Self> {
        NaiveDate::parse_from_str(input.trim(), CANONICAL_FORMAT)
            .map(Self)
            .map_err(|_| LedgerError::DateParse {
                input: input.to_string(),
                expected: "dd.mm.yyyy",
            })
    }

    /// Parse a string in the given display format
    pub fn from_display(input: &str, format: DateFormat) -> LedgerResult<Self> {
        format.parse(input).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Render in a display format
    pub fn to_display(&self, format: DateFormat) -> String {
        format.format(self.0)
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl FromStr for CanonicalDate {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A date with at least one transaction on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day {
    pub date: CanonicalDate,
}

impl Day {
    pub fn new(date: CanonicalDate) -> Self {
        Self { date }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.date.fmt(f)
    }
}

/// Sorting key for a raw canonical string: `d.m.yyyy` -> `yyyy-mm-dd`
///
/// Day and month are zero padded so unpadded input still sorts correctly.
pub fn sort_key(canonical: &str) -> String {
    let mut parts = canonical.split('.');
    let day = parts.next().unwrap_or_default();
    let month = parts.next().unwrap_or_default();
    let year = parts.next().unwrap_or_default();
    format!("{}-{:0>2}-{:0>2}", year, month, day)
}

/// Convert a canonical string to the given display format
pub fn canonical_to_display(canonical: &str, format: DateFormat) -> LedgerResult<String> {
    CanonicalDate::parse(canonical).map(|d| d.to_display(format))
}

/// Convert a display string back to the canonical form
pub fn display_to_canonical(display: &str, format: DateFormat) -> LedgerResult<String> {
    CanonicalDate::from_display(display, format).map(|d| d.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_display() {
        let d = CanonicalDate::from_ymd(2024, 3, 5).unwrap();
        assert_eq!(d.to_string(), "05.03.2024");
        assert_eq!(d.to_display(DateFormat::DayMonthYear), "05/03/2024");
        assert_eq!(d.to_display(DateFormat::YearMonthDay), "2024-03-05");
    }

    #[test]
    fn test_round_trip_both_formats() {
        for canonical in ["01.01.2000", "29.02.2024", "31.12.1999", "07.07.2107"] {
            for format in [DateFormat::DayMonthYear, DateFormat::YearMonthDay] {
                let shown = canonical_to_display(canonical, format).unwrap();
                assert_eq!(display_to_canonical(&shown, format).unwrap(), canonical);
            }
        }
    }

    #[test]
    fn test_strict_display_parsing() {
        let dmy = DateFormat::DayMonthYear;
        assert!(dmy.parse("5/3/2024").is_err());
        assert!(dmy.parse("31/02/2024").is_err());
        assert!(dmy.parse("2024-03-05").is_err());
        assert_eq!(
            dmy.parse("05/03/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );

        let ymd = DateFormat::YearMonthDay;
        assert!(ymd.parse("2024-3-05").is_err());
        assert!(ymd.parse("2024-13-01").is_err());
        assert!(ymd.parse("2024-03-05").is_ok());
    }

    #[test]
    fn test_sort_key_pads_components() {
        assert_eq!(sort_key("5.3.2024"), "2024-03-05");
        assert_eq!(sort_key("15.11.2023"), "2023-11-15");
        assert!(sort_key("01.02.2024") > sort_key("31.01.2024"));
    }

    #[test]
    fn test_canonical_parse_accepts_unpadded() {
        let d = CanonicalDate::parse("5.3.2024").unwrap();
        assert_eq!(d.to_string(), "05.03.2024");
        assert!(CanonicalDate::parse("2024-03-05").is_err());
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let d = CanonicalDate::from_ymd(2024, 7, 1).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"01.07.2024\"");
        let back: CanonicalDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_date_format_serde_names() {
        let json = serde_json::to_string(&DateFormat::YearMonthDay).unwrap();
        assert_eq!(json, "\"yyyy-mm-dd\"");
        assert_eq!(
            "dd/mm/yyyy".parse::<DateFormat>().unwrap(),
            DateFormat::DayMonthYear
        );
    }
}
