//! Storage layer for Ledgerbook
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. This is the persistence behind the local backend.

pub mod file_io;
pub mod init;
pub mod metadata;
pub mod notes;
pub mod transactions;

pub use file_io::{read_json, write_bytes_atomic, write_json_atomic};
pub use init::initialize_storage;
pub use metadata::MetadataRepository;
pub use notes::NoteRepository;
pub use transactions::TransactionRepository;

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub transactions: TransactionRepository,
    pub notes: NoteRepository,
    pub metadata: MetadataRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            notes: NoteRepository::new(paths.notes_file()),
            metadata: MetadataRepository::new(paths.metadata_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LedgerError> {
        self.transactions.load()?;
        self.notes.load()?;
        self.metadata.load()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
