//! Archive export inputs: month groups, export requests and letterhead data

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::transaction::Transaction;
use crate::error::{LedgerError, LedgerResult};

/// The transactions of one calendar month within one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGroup {
    /// Four digit year, e.g. "2024"
    pub year: String,
    /// Month number as stored, "7" or "07"
    pub month: String,
    /// Insertion order is irrelevant; always re-sorted before use
    pub transactions: Vec<Transaction>,
}

impl MonthGroup {
    pub fn new(year: impl Into<String>, month: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: month.into(),
            transactions: Vec::new(),
        }
    }

    /// Month as a number in 1..=12, if the stored string is valid
    pub fn month_number(&self) -> Option<u32> {
        self.month
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|m| (1..=12).contains(m))
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Which part of the ledger an export covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportScope {
    pub year: String,
    /// Absent for a whole-year export
    pub month: Option<String>,
}

impl ExportScope {
    pub fn year(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: None,
        }
    }

    pub fn month(year: impl Into<String>, month: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: Some(month.into()),
        }
    }
}

/// A scope plus the month groups that belong to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub year: String,
    pub month: Option<String>,
    pub months: Vec<MonthGroup>,
}

impl ExportRequest {
    pub fn new(scope: ExportScope, months: Vec<MonthGroup>) -> Self {
        Self {
            year: scope.year,
            month: scope.month,
            months,
        }
    }

    /// `archive_{year}.pdf` or `archive_{year}_M{month}.pdf`
    pub fn file_name(&self) -> String {
        match &self.month {
            Some(month) => format!("archive_{}_M{}.pdf", self.year, month),
            None => format!("archive_{}.pdf", self.year),
        }
    }
}

/// An embedded logo image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl LogoImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Load a PNG or JPEG logo from disk
    pub fn from_path(path: &Path) -> LedgerResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        let mime_type = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            _ => {
                return Err(LedgerError::Validation(format!(
                    "Unsupported logo format: {} (use PNG or JPEG)",
                    path.display()
                )))
            }
        };
        let bytes = std::fs::read(path).map_err(|e| {
            LedgerError::Io(format!("Failed to read logo {}: {}", path.display(), e))
        })?;
        Ok(Self::new(mime_type, bytes))
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// Letterhead printed in the running page header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterheadInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoImage>,
}

impl LetterheadInfo {
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Three-line address block: name, street, postal code and city
    pub fn address_block(&self) -> String {
        format!(
            "{}\n{}\n{} {}",
            self.name, self.address, self.postal_code, self.city
        )
    }
}
