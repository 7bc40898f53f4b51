//! Backend over the local JSON store
//!
//! Each mutating command is persisted before it returns. When the write
//! fails the in-memory repository is reloaded from disk; a reload that
//! fails too is logged, since memory may then hold unsaved changes.

use tracing::{debug, info, warn};

use super::{Backend, NewTransaction};
use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CanonicalDate, Day, NewNote, Note, NoteId, Transaction, TransactionId};
use crate::storage::metadata::{CURRENCY_KEY, INSTALL_DATE_KEY, LANGUAGE_KEY};
use crate::storage::{initialize_storage, Storage};

pub struct LocalBackend {
    storage: Storage,
}

/// Not-found and validation failures pass through; everything else is
/// reported as a failed command
fn command_error(command: &'static str, err: LedgerError) -> LedgerError {
    if err.is_not_found() || err.is_validation() {
        err
    } else {
        LedgerError::backend(command, err)
    }
}

impl LocalBackend {
    /// Open the store, creating it with defaults on first use
    pub fn open(paths: LedgerPaths) -> LedgerResult<Self> {
        initialize_storage(&paths)?;
        let mut storage = Storage::new(paths)?;
        storage.load_all()?;
        debug!(base_dir = %storage.paths().base_dir().display(), "opened local backend");
        Ok(Self { storage })
    }

    fn persist_transactions(&self, command: &'static str) -> LedgerResult<()> {
        if let Err(e) = self.storage.transactions.save() {
            warn!(command, error = %e, "save failed, reloading transactions");
            if let Err(reload) = self.storage.transactions.load() {
                warn!(command, error = %reload, "reload failed, memory may hold unsaved changes");
            }
            return Err(command_error(command, e));
        }
        Ok(())
    }

    fn persist_notes(&self, command: &'static str) -> LedgerResult<()> {
        if let Err(e) = self.storage.notes.save() {
            warn!(command, error = %e, "save failed, reloading notes");
            if let Err(reload) = self.storage.notes.load() {
                warn!(command, error = %reload, "reload failed, memory may hold unsaved changes");
            }
            return Err(command_error(command, e));
        }
        Ok(())
    }

    fn persist_metadata(&self, command: &'static str) -> LedgerResult<()> {
        if let Err(e) = self.storage.metadata.save() {
            warn!(command, error = %e, "save failed, reloading metadata");
            if let Err(reload) = self.storage.metadata.load() {
                warn!(command, error = %reload, "reload failed, memory may hold unsaved changes");
            }
            return Err(command_error(command, e));
        }
        Ok(())
    }
}

impl Backend for LocalBackend {
    fn get_transactions(&self) -> LedgerResult<Vec<Transaction>> {
        self.storage
            .transactions
            .get_all()
            .map_err(|e| command_error("get_transactions", e))
    }

    fn get_days(&self) -> LedgerResult<Vec<Day>> {
        self.storage
            .transactions
            .days()
            .map_err(|e| command_error("get_days", e))
    }

    fn get_install_date(&self) -> LedgerResult<CanonicalDate> {
        let raw = self
            .storage
            .metadata
            .get_required(INSTALL_DATE_KEY)
            .map_err(|e| command_error("get_install_date", e))?;
        CanonicalDate::parse(&raw).map_err(|e| command_error("get_install_date", e))
    }

    fn add_transaction(&self, transaction: NewTransaction) -> LedgerResult<()> {
        let id = self
            .storage
            .transactions
            .insert(transaction.into_transaction())
            .map_err(|e| command_error("add_transaction", e))?;
        self.persist_transactions("add_transaction")?;
        info!(%id, "added transaction");
        Ok(())
    }

    fn update_transaction(&self, transaction: Transaction) -> LedgerResult<()> {
        let id = transaction.id;
        self.storage
            .transactions
            .update(transaction)
            .map_err(|e| command_error("update_transaction", e))?;
        self.persist_transactions("update_transaction")?;
        info!(id = ?id, "updated transaction");
        Ok(())
    }

    fn delete_transaction(&self, id: TransactionId) -> LedgerResult<()> {
        self.storage
            .transactions
            .delete(id)
            .map_err(|e| command_error("delete_transaction", e))?;
        self.persist_transactions("delete_transaction")?;
        info!(%id, "deleted transaction");
        Ok(())
    }

    fn get_notes(&self) -> LedgerResult<Vec<Note>> {
        self.storage
            .notes
            .get_all()
            .map_err(|e| command_error("get_notes", e))
    }

    fn add_note(&self, note: NewNote) -> LedgerResult<()> {
        let id = self
            .storage
            .notes
            .insert(note.content)
            .map_err(|e| command_error("add_note", e))?;
        self.persist_notes("add_note")?;
        info!(%id, "added note");
        Ok(())
    }

    fn update_note(&self, note: Note) -> LedgerResult<()> {
        let id = note.id;
        self.storage
            .notes
            .update(note)
            .map_err(|e| command_error("update_note", e))?;
        self.persist_notes("update_note")?;
        info!(%id, "updated note");
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> LedgerResult<()> {
        self.storage
            .notes
            .delete(id)
            .map_err(|e| command_error("delete_note", e))?;
        self.persist_notes("delete_note")?;
        info!(%id, "deleted note");
        Ok(())
    }

    fn get_currency(&self) -> LedgerResult<String> {
        self.storage
            .metadata
            .get_required(CURRENCY_KEY)
            .map_err(|e| command_error("get_currency", e))
    }

    fn set_currency(&self, currency: &str) -> LedgerResult<()> {
        self.storage
            .metadata
            .set(CURRENCY_KEY, currency)
            .map_err(|e| command_error("set_currency", e))?;
        self.persist_metadata("set_currency")
    }

    fn get_language(&self) -> LedgerResult<String> {
        self.storage
            .metadata
            .get_required(LANGUAGE_KEY)
            .map_err(|e| command_error("get_language", e))
    }

    fn set_language(&self, language: &str) -> LedgerResult<()> {
        self.storage
            .metadata
            .set(LANGUAGE_KEY, language)
            .map_err(|e| command_error("set_language", e))?;
        self.persist_metadata("set_language")
    }
}
