//! Ledgerbook - personal income and expense ledger
//!
//! This library provides the core of the Ledgerbook application: a ledger of
//! dated income and expense entries, free-form notes, a month archive, and a
//! printable archive document built per year or per month.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, notes, dates, money)
//! - `storage`: JSON file storage layer
//! - `backend`: Typed backend commands over the store
//! - `services`: Business logic layer
//! - `reports`: Aggregation, summaries, charts and the archive document
//! - `export`: Document renderers and CSV export
//! - `i18n`: Embedded translation catalogs
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerbook::backend::LocalBackend;
//! use ledgerbook::config::paths::LedgerPaths;
//! use ledgerbook::services::TransactionService;
//!
//! let backend = LocalBackend::open(LedgerPaths::new()?)?;
//! let service = TransactionService::load(&backend)?;
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
