//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json, together
//! with the index of days that have at least one transaction.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{CanonicalDate, Day, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    days: Vec<CanonicalDate>,
}

/// Repository for transaction persistence with the days index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Dates with at least one transaction
    days: RwLock<BTreeSet<CanonicalDate>>,
}

fn read_lock_err(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
}

fn write_lock_err(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            days: RwLock::new(BTreeSet::new()),
        }
    }

    /// Load transactions from disk and rebuild the days index
    ///
    /// A file holding an invalid transaction is rejected as a whole and the
    /// in-memory state stays as it was.
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut loaded = HashMap::with_capacity(file_data.transactions.len());
        let mut loaded_days: BTreeSet<CanonicalDate> = file_data.days.into_iter().collect();
        for txn in file_data.transactions {
            let Some(id) = txn.id else {
                return Err(LedgerError::Storage(format!(
                    "Transaction without id in {}",
                    self.path.display()
                )));
            };
            txn.validate().map_err(|e| {
                LedgerError::Storage(format!(
                    "Invalid transaction {} in {}: {}",
                    id,
                    self.path.display(),
                    e
                ))
            })?;
            loaded_days.insert(txn.date);
            loaded.insert(id, txn);
        }

        let mut data = self.data.write().map_err(write_lock_err)?;
        let mut days = self.days.write().map_err(write_lock_err)?;
        *data = loaded;
        *days = loaded_days;

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let data = self.data.read().map_err(read_lock_err)?;
        let days = self.days.read().map_err(read_lock_err)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by_key(|t| t.id);

        let file_data = TransactionData {
            transactions,
            days: days.iter().copied().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let data = self.data.read().map_err(read_lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all transactions in id (insertion) order
    pub fn get_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let data = self.data.read().map_err(read_lock_err)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by_key(|t| t.id);
        Ok(transactions)
    }

    /// Days with activity, oldest first
    pub fn days(&self) -> Result<Vec<Day>, LedgerError> {
        let days = self.days.read().map_err(read_lock_err)?;
        Ok(days.iter().copied().map(Day::new).collect())
    }

    /// Insert a new transaction, assigning the next id
    pub fn insert(&self, mut txn: Transaction) -> Result<TransactionId, LedgerError> {
        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let mut data = self.data.write().map_err(write_lock_err)?;
        let mut days = self.days.write().map_err(write_lock_err)?;

        let id = data
            .keys()
            .max()
            .map(|id| id.next())
            .unwrap_or(TransactionId::new(1));
        txn.id = Some(id);

        days.insert(txn.date);
        data.insert(id, txn);
        Ok(id)
    }

    /// Replace an existing transaction
    ///
    /// The old date leaves the days index when nothing else remains on it.
    pub fn update(&self, txn: Transaction) -> Result<(), LedgerError> {
        let id = txn
            .id
            .ok_or_else(|| LedgerError::Validation("Transaction id is required for update".into()))?;
        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let mut data = self.data.write().map_err(write_lock_err)?;
        let mut days = self.days.write().map_err(write_lock_err)?;

        let old_date = data
            .get(&id)
            .map(|old| old.date)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        let new_date = txn.date;
        data.insert(id, txn);
        days.insert(new_date);

        if old_date != new_date && !data.values().any(|t| t.date == old_date) {
            days.remove(&old_date);
        }
        Ok(())
    }

    /// Delete a transaction, returning it
    pub fn delete(&self, id: TransactionId) -> Result<Transaction, LedgerError> {
        let mut data = self.data.write().map_err(write_lock_err)?;
        let mut days = self.days.write().map_err(write_lock_err)?;

        let txn = data
            .remove(&id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        if !data.values().any(|t| t.date == txn.date) {
            days.remove(&txn.date);
        }
        Ok(txn)
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(read_lock_err)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(day: u32, cents: i64) -> Transaction {
        Transaction::new(
            CanonicalDate::from_ymd(2025, 1, day).unwrap(),
            "Groceries",
            Money::from_cents(-cents),
            TransactionType::Expense,
        )
    }

    fn day_dates(repo: &TransactionRepository) -> Vec<String> {
        repo.days()
            .unwrap()
            .into_iter()
            .map(|d| d.to_string())
            .collect()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.days().unwrap().is_empty());
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let first = repo.insert(expense(15, 5000)).unwrap();
        let second = repo.insert(expense(16, 100)).unwrap();
        assert_eq!(first, TransactionId::new(1));
        assert_eq!(second, TransactionId::new(2));

        let retrieved = repo.get(first).unwrap().unwrap();
        assert_eq!(retrieved.amount, Money::from_cents(-5000));
        assert_eq!(day_dates(&repo), vec!["15.01.2025", "16.01.2025"]);
    }

    #[test]
    fn test_update_moves_day_only_when_last() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let a = repo.insert(expense(10, 100)).unwrap();
        repo.insert(expense(10, 200)).unwrap();

        let mut moved = repo.get(a).unwrap().unwrap();
        moved.date = CanonicalDate::from_ymd(2025, 1, 20).unwrap();
        repo.update(moved).unwrap();
        assert_eq!(day_dates(&repo), vec!["10.01.2025", "20.01.2025"]);

        let mut back = repo.get(a).unwrap().unwrap();
        back.date = CanonicalDate::from_ymd(2025, 1, 11).unwrap();
        repo.update(back).unwrap();
        assert_eq!(day_dates(&repo), vec!["10.01.2025", "11.01.2025"]);
    }

    #[test]
    fn test_insert_rejects_sign_mismatch() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let mut bad = expense(3, 100);
        bad.amount = Money::from_cents(100);
        assert!(repo.insert(bad).unwrap_err().is_validation());
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.days().unwrap().is_empty());
    }

    #[test]
    fn test_load_rejects_oversized_amount() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.insert(expense(2, 100)).unwrap();

        let path = temp_dir.path().join("transactions.json");
        std::fs::write(
            &path,
            r#"{"transactions":[{"id":1,"date":"01.01.2025","description":"Big","amount":"79228162514264337593543950335","transaction_type":"income"}],"days":["01.01.2025"]}"#,
        )
        .unwrap();

        assert!(matches!(repo.load(), Err(LedgerError::Storage(_))));
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(day_dates(&repo), vec!["02.01.2025"]);
    }

    #[test]
    fn test_insert_rejects_oversized_amount() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let mut huge = expense(3, 100);
        huge.amount = -(Money::MAX_MAGNITUDE + Money::from_cents(1));
        assert!(repo.insert(huge).unwrap_err().is_validation());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let ghost = expense(1, 100).with_id(TransactionId::new(99));
        assert!(repo.update(ghost).unwrap_err().is_not_found());
        assert!(repo.update(expense(1, 100)).unwrap_err().is_validation());
    }

    #[test]
    fn test_delete_removes_last_day() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let a = repo.insert(expense(5, 100)).unwrap();
        let b = repo.insert(expense(5, 200)).unwrap();

        repo.delete(a).unwrap();
        assert_eq!(day_dates(&repo), vec!["05.01.2025"]);

        repo.delete(b).unwrap();
        assert!(repo.days().unwrap().is_empty());
        assert!(repo.delete(b).unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let id = repo.insert(expense(15, 5000)).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(id).unwrap().unwrap().description, "Groceries");
        assert_eq!(day_dates(&repo2), vec!["15.01.2025"]);
    }
}
