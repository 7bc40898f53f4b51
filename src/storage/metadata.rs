//! Key/value metadata: install date, currency and language

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;

use super::file_io::{read_json, write_json_atomic};

pub const INSTALL_DATE_KEY: &str = "install_date";
pub const CURRENCY_KEY: &str = "currency";
pub const LANGUAGE_KEY: &str = "language";

/// Repository for metadata entries
pub struct MetadataRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl MetadataRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: BTreeMap<String, String> = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data;
        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        write_json_atomic(&self.path, &*data)
    }

    /// Value for a key, if set
    pub fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    /// Value for a key that must exist
    pub fn get_required(&self, key: &str) -> Result<String, LedgerError> {
        self.get(key)?
            .ok_or_else(|| LedgerError::metadata_not_found(key))
    }

    /// Set a value, replacing any previous one
    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Set a value only when the key is absent; returns whether it was written
    pub fn set_if_absent(&self, key: &str, value: impl Into<String>) -> Result<bool, LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        if data.contains_key(key) {
            return Ok(false);
        }
        data.insert(key.to_string(), value.into());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_if_absent_keeps_existing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = MetadataRepository::new(temp_dir.path().join("metadata.json"));
        repo.load().unwrap();

        assert!(repo.set_if_absent(CURRENCY_KEY, "€").unwrap());
        assert!(!repo.set_if_absent(CURRENCY_KEY, "$").unwrap());
        assert_eq!(repo.get_required(CURRENCY_KEY).unwrap(), "€");

        repo.set(CURRENCY_KEY, "$").unwrap();
        assert_eq!(repo.get(CURRENCY_KEY).unwrap().as_deref(), Some("$"));
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let repo = MetadataRepository::new(temp_dir.path().join("metadata.json"));
        repo.load().unwrap();
        assert!(repo.get_required(LANGUAGE_KEY).unwrap_err().is_not_found());
    }

    #[test]
    fn test_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metadata.json");
        let repo = MetadataRepository::new(path.clone());
        repo.load().unwrap();
        repo.set(LANGUAGE_KEY, "de").unwrap();
        repo.save().unwrap();

        let reloaded = MetadataRepository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_required(LANGUAGE_KEY).unwrap(), "de");
    }
}
