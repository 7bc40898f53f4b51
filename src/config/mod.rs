//! Configuration module for Ledgerbook
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Local settings persistence (date format, rounding, letterhead)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{LetterheadDefaults, Settings};
