//! Export module for Ledgerbook
//!
//! - Archive: renderer trait and the JSON document-definition renderer
//! - CSV: the transaction ledger (spreadsheet-compatible)

pub mod archive;
pub mod csv;

pub use archive::{
    export_archive, DefinitionRenderer, DocumentRenderer, FontAssets, RenderedDocument,
};
pub use self::csv::export_transactions_csv;
