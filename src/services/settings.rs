//! Settings service
//!
//! Currency and language are stored by the backend; the date format,
//! rounding policy and letterhead defaults live in the local settings file.

use tracing::{info, warn};

use crate::backend::Backend;
use crate::config::paths::LedgerPaths;
use crate::config::settings::{LetterheadDefaults, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::i18n::{Language, Translator};
use crate::models::{DateFormat, RoundingPolicy};
use crate::reports::ReportConfig;
use crate::storage::init::{DEFAULT_CURRENCY, DEFAULT_LANGUAGE};

/// Service for user preferences
pub struct SettingsService<'a> {
    backend: &'a dyn Backend,
    paths: &'a LedgerPaths,
    settings: Settings,
}

impl<'a> SettingsService<'a> {
    pub fn load(backend: &'a dyn Backend, paths: &'a LedgerPaths) -> LedgerResult<Self> {
        let settings = Settings::load_or_create(paths)?;
        Ok(Self {
            backend,
            paths,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Currency symbol, or the default when the backend cannot answer
    pub fn currency(&self) -> String {
        self.backend.get_currency().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default currency");
            DEFAULT_CURRENCY.to_string()
        })
    }

    pub fn set_currency(&self, currency: &str) -> LedgerResult<()> {
        let currency = currency.trim();
        if currency.is_empty() {
            return Err(LedgerError::Validation("Currency cannot be empty".into()));
        }
        self.backend.set_currency(currency)?;
        info!(currency, "currency changed");
        Ok(())
    }

    /// Interface language, or English when the backend cannot answer
    pub fn language(&self) -> Language {
        match self.backend.get_language() {
            Ok(code) => Language::from_code(&code),
            Err(e) => {
                warn!(error = %e, "falling back to default language");
                Language::from_code(DEFAULT_LANGUAGE)
            }
        }
    }

    pub fn set_language(&self, code: &str) -> LedgerResult<Language> {
        let language: Language = code.parse().map_err(LedgerError::Validation)?;
        self.backend.set_language(language.code())?;
        info!(language = %language, "language changed");
        Ok(language)
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.language())
    }

    pub fn date_format(&self) -> DateFormat {
        self.settings.date_format
    }

    pub fn set_date_format(&mut self, format: DateFormat) -> LedgerResult<()> {
        self.settings.date_format = format;
        self.settings.save(self.paths)
    }

    pub fn set_rounding(&mut self, rounding: RoundingPolicy) -> LedgerResult<()> {
        self.settings.rounding = rounding;
        self.settings.save(self.paths)
    }

    pub fn letterhead(&self) -> &LetterheadDefaults {
        &self.settings.letterhead
    }

    pub fn set_letterhead(&mut self, letterhead: LetterheadDefaults) -> LedgerResult<()> {
        self.settings.letterhead = letterhead;
        self.settings.save(self.paths)
    }

    /// Everything the report builders need, resolved once
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            currency_symbol: self.currency(),
            date_format: self.settings.date_format,
            language: self.language(),
            rounding: self.settings.rounding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_from_fresh_store() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let backend = LocalBackend::open(paths.clone()).unwrap();
        let service = SettingsService::load(&backend, &paths).unwrap();

        let config = service.report_config();
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.language, Language::En);
        assert_eq!(config.date_format, DateFormat::DayMonthYear);
    }

    #[test]
    fn test_changes_persist() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let backend = LocalBackend::open(paths.clone()).unwrap();
        let mut service = SettingsService::load(&backend, &paths).unwrap();

        service.set_currency("$").unwrap();
        assert_eq!(service.set_language("DE").unwrap(), Language::De);
        service.set_date_format(DateFormat::YearMonthDay).unwrap();

        let reopened = SettingsService::load(&backend, &paths).unwrap();
        let config = reopened.report_config();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.language, Language::De);
        assert_eq!(config.date_format, DateFormat::YearMonthDay);
        assert_eq!(reopened.translator().t("archive.net_balance"), "Nettosaldo");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let backend = LocalBackend::open(paths.clone()).unwrap();
        let service = SettingsService::load(&backend, &paths).unwrap();

        assert!(service.set_currency("  ").unwrap_err().is_validation());
        assert!(service.set_language("fr").unwrap_err().is_validation());
        assert_eq!(service.language(), Language::En);
    }
}
