//! Service layer for Ledgerbook
//!
//! Services sit on top of the backend. They validate user input, keep the
//! last loaded snapshot for display, and hand it to the report builders.

pub mod archive;
pub mod note;
pub mod period;
pub mod settings;
pub mod transaction;

pub use archive::{ArchiveFilter, ArchiveService, ArchiveYear, Selection};
pub use note::NoteService;
pub use period::MonthNavigator;
pub use settings::SettingsService;
pub use transaction::{TransactionForm, TransactionService};
