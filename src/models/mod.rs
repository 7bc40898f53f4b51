//! Core data models for Ledgerbook
//!
//! Transactions, notes, dates, money and the archive export inputs.

pub mod archive;
pub mod date;
pub mod ids;
pub mod money;
pub mod note;
pub mod period;
pub mod transaction;

pub use archive::{ExportRequest, ExportScope, LetterheadInfo, LogoImage, MonthGroup};
pub use date::{CanonicalDate, DateFormat, Day};
pub use ids::{NoteId, TransactionId};
pub use money::{Money, RoundingPolicy};
pub use note::{NewNote, Note};
pub use period::{DateRange, MonthPeriod};
pub use transaction::{Transaction, TransactionType};
