//! Custom error types for Ledgerbook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Ledgerbook operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// A date string did not match the expected shape
    #[error("Invalid date '{input}': expected {expected}")]
    DateParse {
        input: String,
        expected: &'static str,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A backend command was rejected
    #[error("Backend command '{command}' failed: {message}")]
    Backend {
        command: &'static str,
        message: String,
    },

    /// Renderer resources (fonts, images) could not be initialized
    #[error("Asset error: {0}")]
    Assets(String),

    /// The renderer failed to produce a document
    #[error("Render error: {0}")]
    Render(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for notes
    pub fn note_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Note",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for metadata entries
    pub fn metadata_not_found(key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Metadata",
            identifier: key.into(),
        }
    }

    /// Wrap any error as a failed backend command
    pub fn backend(command: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Backend {
            command,
            message: err.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::DateParse { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for Ledgerbook operations
pub type LedgerResult<T> = Result<T, LedgerError>;
