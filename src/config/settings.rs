//! User settings for Ledgerbook
//!
//! Holds the preferences that live on this machine rather than in the
//! backend: date display format, rounding policy, letterhead defaults and
//! the fonts directory used by document renderers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::{DateFormat, LetterheadInfo, LogoImage, RoundingPolicy};

/// Letterhead values used when an export does not override them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterheadDefaults {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
    /// PNG or JPEG printed in the top-right corner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,
}

impl LetterheadDefaults {
    /// Build the letterhead, loading the logo from disk if one is configured
    pub fn to_letterhead(&self) -> Result<LetterheadInfo, LedgerError> {
        let logo = match &self.logo_path {
            Some(path) => Some(LogoImage::from_path(path)?),
            None => None,
        };
        Ok(LetterheadInfo {
            name: self.name.clone(),
            address: self.address.clone(),
            postal_code: self.postal_code.clone(),
            city: self.city.clone(),
            logo,
        })
    }
}

/// User settings for Ledgerbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// How dates are shown and entered
    #[serde(default)]
    pub date_format: DateFormat,

    /// How currency values are rounded to two digits
    #[serde(default)]
    pub rounding: RoundingPolicy,

    #[serde(default)]
    pub letterhead: LetterheadDefaults,

    /// Directory holding the fonts a renderer embeds; unset means built-in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: DateFormat::default(),
            rounding: RoundingPolicy::default(),
            letterhead: LetterheadDefaults::default(),
            fonts_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.date_format, DateFormat::DayMonthYear);
        assert_eq!(settings.rounding, RoundingPolicy::HalfAwayFromZero);
        assert!(settings.fonts_dir.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.date_format = DateFormat::YearMonthDay;
        settings.letterhead.name = "Jane Roe".into();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, DateFormat::YearMonthDay);
        assert_eq!(loaded.letterhead.name, "Jane Roe");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format":"yyyy-mm-dd"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.schema_version, 1);
        assert_eq!(loaded.date_format, DateFormat::YearMonthDay);
        assert_eq!(loaded.rounding, RoundingPolicy::HalfAwayFromZero);
    }

    #[test]
    fn test_letterhead_without_logo() {
        let defaults = LetterheadDefaults {
            name: "Jane".into(),
            ..Default::default()
        };
        let info = defaults.to_letterhead().unwrap();
        assert_eq!(info.name, "Jane");
        assert!(info.logo.is_none());
    }
}
