//! Typed client interface to the persistence backend
//!
//! Every backend command is one trait method with explicit request and
//! response types. The crate ships [`LocalBackend`], a JSON file store; any
//! other store can sit behind the same trait.

pub mod local;

pub use local::LocalBackend;

use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;
use crate::models::{CanonicalDate, Day, Money, NewNote, Note, NoteId, Transaction, TransactionId, TransactionType};

/// Create request for a transaction; the backend assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: CanonicalDate,
    pub description: String,
    /// Signed: income positive, expense negative
    pub amount: Money,
    pub transaction_type: TransactionType,
}

impl NewTransaction {
    pub fn into_transaction(self) -> Transaction {
        Transaction::new(self.date, self.description, self.amount, self.transaction_type)
    }
}

/// Backend commands
pub trait Backend {
    fn get_transactions(&self) -> LedgerResult<Vec<Transaction>>;

    /// Dates with at least one transaction
    fn get_days(&self) -> LedgerResult<Vec<Day>>;

    fn get_install_date(&self) -> LedgerResult<CanonicalDate>;

    fn add_transaction(&self, transaction: NewTransaction) -> LedgerResult<()>;

    /// Fails with not-found when the id is unknown
    fn update_transaction(&self, transaction: Transaction) -> LedgerResult<()>;

    fn delete_transaction(&self, id: TransactionId) -> LedgerResult<()>;

    fn get_notes(&self) -> LedgerResult<Vec<Note>>;

    fn add_note(&self, note: NewNote) -> LedgerResult<()>;

    fn update_note(&self, note: Note) -> LedgerResult<()>;

    fn delete_note(&self, id: NoteId) -> LedgerResult<()>;

    fn get_currency(&self) -> LedgerResult<String>;

    fn set_currency(&self, currency: &str) -> LedgerResult<()>;

    fn get_language(&self) -> LedgerResult<String>;

    fn set_language(&self, language: &str) -> LedgerResult<()>;
}
