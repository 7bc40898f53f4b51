//! Storage initialization
//!
//! Handles first-run setup: install date, default currency and language.
//! Existing values are never overwritten.

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::CanonicalDate;

use super::file_io::write_json_atomic;
use super::metadata::{MetadataRepository, CURRENCY_KEY, INSTALL_DATE_KEY, LANGUAGE_KEY};

pub const DEFAULT_CURRENCY: &str = "€";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Initialize storage for a fresh installation
pub fn initialize_storage(paths: &LedgerPaths) -> Result<(), LedgerError> {
    paths.ensure_directories()?;

    let metadata = MetadataRepository::new(paths.metadata_file());
    metadata.load()?;
    seed_defaults(&metadata, CanonicalDate::today())?;
    metadata.save()?;

    for file in [paths.transactions_file(), paths.notes_file()] {
        if !file.exists() {
            write_json_atomic(&file, &serde_json::json!({}))?;
        }
    }

    Ok(())
}

/// Record install date, currency and language unless already present
pub fn seed_defaults(metadata: &MetadataRepository, today: CanonicalDate) -> Result<(), LedgerError> {
    if metadata.set_if_absent(INSTALL_DATE_KEY, today.to_string())? {
        tracing::info!(install_date = %today, "recorded install date");
    }
    metadata.set_if_absent(CURRENCY_KEY, DEFAULT_CURRENCY)?;
    metadata.set_if_absent(LANGUAGE_KEY, DEFAULT_LANGUAGE)?;
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &LedgerPaths) -> bool {
    !paths.is_initialized()
}
