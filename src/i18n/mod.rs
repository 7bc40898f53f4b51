//! Key-based label lookup
//!
//! Catalogs are embedded JSON trees; keys are dot paths such as
//! `archive.net_balance` or `archive.months_pdf.6`. Lookups fall back to
//! English, then to the key itself.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    De,
    Ru,
    Es,
    Pl,
}

impl Language {
    pub const ALL: [Language; 5] = [Self::En, Self::De, Self::Ru, Self::Es, Self::Pl];

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Ru => "ru",
            Self::Es => "es",
            Self::Pl => "pl",
        }
    }

    /// Parse a language code, falling back to English for anything unknown
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }

    fn catalog_source(&self) -> &'static str {
        match self {
            Self::En => include_str!("locales/en.json"),
            Self::De => include_str!("locales/de.json"),
            Self::Ru => include_str!("locales/ru.json"),
            Self::Es => include_str!("locales/es.json"),
            Self::Pl => include_str!("locales/pl.json"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| format!("Unsupported language: {}", s))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

fn parse_catalog(language: Language) -> Value {
    serde_json::from_str(language.catalog_source()).unwrap_or(Value::Null)
}

/// Walk a dot path through objects and arrays
fn lookup<'a>(catalog: &'a Value, key: &str) -> Option<&'a str> {
    let mut node = catalog;
    for part in key.split('.') {
        node = match node {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    node.as_str()
}

/// Translator for one language with English fallback
#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
    catalog: Value,
    fallback: Value,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        let fallback = parse_catalog(Language::En);
        let catalog = if language == Language::En {
            fallback.clone()
        } else {
            parse_catalog(language)
        };
        Self {
            language,
            catalog,
            fallback,
        }
    }

    /// Translator for a language code; unknown codes get English
    pub fn for_code(code: &str) -> Self {
        Self::new(Language::from_code(code))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Translate a key
    pub fn t(&self, key: &str) -> String {
        lookup(&self.catalog, key)
            .or_else(|| lookup(&self.fallback, key))
            .unwrap_or(key)
            .to_string()
    }

    /// Localized month name for a month number in 1..=12
    pub fn month_name(&self, month: u32) -> String {
        if !(1..=12).contains(&month) {
            return month.to_string();
        }
        self.t(&format!("archive.months_pdf.{}", month - 1))
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::En)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_catalogs_parse() {
        for lang in Language::ALL {
            let value: Value = serde_json::from_str(lang.catalog_source()).unwrap();
            assert!(value.is_object(), "{} catalog", lang);
        }
    }

    #[test]
    fn test_every_english_month_is_translated() {
        for lang in Language::ALL {
            let translator = Translator::new(lang);
            for month in 1..=12 {
                let key = format!("archive.months_pdf.{}", month - 1);
                assert!(lookup(&translator.catalog, &key).is_some(), "{} {}", lang, key);
            }
        }
    }

    #[test]
    fn test_lookup_and_fallback() {
        let de = Translator::new(Language::De);
        assert_eq!(de.t("archive.net_balance"), "Nettosaldo");
        assert_eq!(de.month_name(3), "März");
        assert_eq!(de.t("missing.key"), "missing.key");

        let en = Translator::for_code("xx");
        assert_eq!(en.language(), Language::En);
        assert_eq!(en.month_name(7), "July");
        assert_eq!(en.month_name(13), "13");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!("PL".parse::<Language>().unwrap(), Language::Pl);
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::Ru.to_string(), "ru");
    }
}
