//! Transaction service
//!
//! Holds the last successfully loaded snapshot of the ledger and routes
//! every change through the backend. A mutation reloads the snapshot after
//! it succeeds; a failed backend call leaves the snapshot untouched.

use tracing::{debug, warn};

use crate::backend::{Backend, NewTransaction};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    CanonicalDate, DateFormat, DateRange, Money, Transaction, TransactionId, TransactionType,
};
use crate::reports::filter_by_range;

/// Lowest year accepted regardless of install date
pub const MIN_YEAR: i32 = 1800;
/// Highest year accepted
pub const MAX_YEAR: i32 = 2100;
/// How far before the install year a transaction may be dated
pub const YEARS_BEFORE_INSTALL: i32 = 100;

/// Raw input as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    pub description: String,
    /// Positive magnitude; the sign comes from the type
    pub amount: String,
    /// In the selected display format
    pub date: String,
    pub transaction_type: TransactionType,
}

impl TransactionForm {
    /// Pre-fill a form from a stored transaction
    pub fn from_transaction(txn: &Transaction, date_format: DateFormat) -> Self {
        Self {
            description: txn.description.clone(),
            amount: txn.magnitude().to_string(),
            date: txn.date.to_display(date_format),
            transaction_type: txn.transaction_type,
        }
    }

    /// Validate and convert into a create request
    pub fn validate(
        &self,
        date_format: DateFormat,
        install_date: Option<CanonicalDate>,
    ) -> LedgerResult<NewTransaction> {
        let description = self.description.trim();
        let amount = self.amount.trim();
        let date = self.date.trim();
        if description.is_empty() || amount.is_empty() || date.is_empty() {
            return Err(LedgerError::Validation(
                "Description, amount and date are required".into(),
            ));
        }

        let magnitude = Money::parse(amount)
            .ok()
            .filter(|m| m.is_positive())
            .ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Amount must be a number greater than zero: {}",
                    amount
                ))
            })?;
        if !magnitude.is_within_limit() {
            return Err(LedgerError::Validation(format!(
                "Amount must not exceed {}",
                Money::MAX_MAGNITUDE
            )));
        }

        let parsed = CanonicalDate::from_display(date, date_format)?;

        let min_year = install_date
            .map(|d| d.year() - YEARS_BEFORE_INSTALL)
            .unwrap_or(MIN_YEAR)
            .max(MIN_YEAR);
        if parsed.year() < min_year || parsed.year() > MAX_YEAR {
            return Err(LedgerError::Validation(format!(
                "Year must be between {} and {}",
                min_year, MAX_YEAR
            )));
        }

        Ok(NewTransaction {
            date: parsed,
            description: description.to_string(),
            amount: self.transaction_type.signed(magnitude),
            transaction_type: self.transaction_type,
        })
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    backend: &'a dyn Backend,
    snapshot: Vec<Transaction>,
}

impl<'a> TransactionService<'a> {
    /// Create a service with an empty snapshot
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            snapshot: Vec::new(),
        }
    }

    /// Create a service and load the current snapshot
    pub fn load(backend: &'a dyn Backend) -> LedgerResult<Self> {
        let mut service = Self::new(backend);
        service.refresh()?;
        Ok(service)
    }

    /// Re-read all transactions; on failure the old snapshot stays
    pub fn refresh(&mut self) -> LedgerResult<()> {
        let transactions = self.backend.get_transactions().map_err(|e| {
            warn!(error = %e, "failed to load transactions");
            e
        })?;
        debug!(count = transactions.len(), "loaded transactions");
        self.snapshot = transactions;
        Ok(())
    }

    /// Current snapshot in backend order
    pub fn transactions(&self) -> &[Transaction] {
        &self.snapshot
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.snapshot.iter().find(|t| t.id == Some(id))
    }

    /// Transactions inside an inclusive date range, most recent first
    pub fn in_range(&self, range: &DateRange) -> Vec<Transaction> {
        let mut inside = filter_by_range(&self.snapshot, range);
        crate::reports::aggregate::sort_date_descending(&mut inside);
        inside
    }

    /// Install date, or `None` when the backend cannot provide it
    pub fn install_date(&self) -> Option<CanonicalDate> {
        match self.backend.get_install_date() {
            Ok(date) => Some(date),
            Err(e) => {
                warn!(error = %e, "install date unavailable");
                None
            }
        }
    }

    /// Validate a form and add it as a new transaction
    pub fn add(&mut self, form: &TransactionForm, date_format: DateFormat) -> LedgerResult<()> {
        let request = form.validate(date_format, self.install_date())?;
        self.backend.add_transaction(request)?;
        self.refresh()
    }

    /// Validate a form and replace an existing transaction with it
    pub fn update(
        &mut self,
        id: TransactionId,
        form: &TransactionForm,
        date_format: DateFormat,
    ) -> LedgerResult<()> {
        let request = form.validate(date_format, self.install_date())?;
        self.backend
            .update_transaction(request.into_transaction().with_id(id))?;
        self.refresh()
    }

    pub fn delete(&mut self, id: TransactionId) -> LedgerResult<()> {
        self.backend.delete_transaction(id)?;
        self.refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use crate::config::paths::LedgerPaths;
    use tempfile::TempDir;

    fn form(description: &str, amount: &str, date: &str, kind: TransactionType) -> TransactionForm {
        TransactionForm {
            description: description.into(),
            amount: amount.into(),
            date: date.into(),
            transaction_type: kind,
        }
    }

    fn backend() -> (TempDir, LocalBackend) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, LocalBackend::open(paths).unwrap())
    }

    #[test]
    fn test_validate_signs_by_type() {
        let expense = form("Rent", "750,5", "01/03/2024", TransactionType::Expense)
            .validate(DateFormat::DayMonthYear, None)
            .unwrap();
        assert_eq!(expense.amount, Money::from_cents(-75_050));
        assert_eq!(expense.date.to_string(), "01.03.2024");

        let income = form("Pay", "10", "2024-03-01", TransactionType::Income)
            .validate(DateFormat::YearMonthDay, None)
            .unwrap();
        assert_eq!(income.amount, Money::from_cents(1_000));
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let fmt = DateFormat::DayMonthYear;
        let cases = [
            form("", "10", "01/03/2024", TransactionType::Income),
            form("x", "0", "01/03/2024", TransactionType::Income),
            form("x", "-5", "01/03/2024", TransactionType::Income),
            form("x", "abc", "01/03/2024", TransactionType::Income),
            form("x", "10", "31/02/2024", TransactionType::Income),
            form("x", "10", "1/3/2024", TransactionType::Income),
            form("x", "10", "01/03/2101", TransactionType::Income),
            form("x", "10", "01/03/1799", TransactionType::Income),
        ];
        for case in cases {
            let err = case.validate(fmt, None).unwrap_err();
            assert!(err.is_validation(), "{:?} -> {}", case, err);
        }
    }

    #[test]
    fn test_amount_upper_limit() {
        let fmt = DateFormat::DayMonthYear;
        let at_limit = form("Estate", "1000000000000000", "01/03/2024", TransactionType::Income);
        assert_eq!(
            at_limit.validate(fmt, None).unwrap().amount,
            Money::MAX_MAGNITUDE
        );

        let over = form(
            "Estate",
            "79228162514264337593543950335",
            "01/03/2024",
            TransactionType::Income,
        );
        let err = over.validate(fmt, None).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn test_year_bound_follows_install_date() {
        let install = CanonicalDate::from_ymd(2024, 5, 1);
        let early = form("x", "1", "01/01/1923", TransactionType::Income);
        assert!(early.validate(DateFormat::DayMonthYear, install).is_err());
        assert!(early.validate(DateFormat::DayMonthYear, None).is_ok());

        let edge = form("x", "1", "01/01/1924", TransactionType::Income);
        assert!(edge.validate(DateFormat::DayMonthYear, install).is_ok());
    }

    #[test]
    fn test_form_round_trip_from_transaction() {
        let txn = Transaction::new(
            CanonicalDate::from_ymd(2024, 7, 9).unwrap(),
            "Books",
            Money::from_cents(-1_999),
            TransactionType::Expense,
        );
        let prefilled = TransactionForm::from_transaction(&txn, DateFormat::YearMonthDay);
        assert_eq!(prefilled.amount, "19.99");
        assert_eq!(prefilled.date, "2024-07-09");
        let back = prefilled.validate(DateFormat::YearMonthDay, None).unwrap();
        assert_eq!(back.into_transaction(), txn);
    }

    #[test]
    fn test_service_mutations_refresh_snapshot() {
        let (_dir, backend) = backend();
        let mut service = TransactionService::load(&backend).unwrap();
        assert!(service.transactions().is_empty());

        let today = CanonicalDate::today().to_display(DateFormat::DayMonthYear);
        service
            .add(&form("Coffee", "3.50", &today, TransactionType::Expense), DateFormat::DayMonthYear)
            .unwrap();
        assert_eq!(service.transactions().len(), 1);
        let id = service.transactions()[0].id.unwrap();

        service
            .update(id, &form("Tea", "2", &today, TransactionType::Expense), DateFormat::DayMonthYear)
            .unwrap();
        assert_eq!(service.get(id).unwrap().description, "Tea");

        service.delete(id).unwrap();
        assert!(service.transactions().is_empty());
    }

    #[test]
    fn test_failed_call_keeps_snapshot() {
        let (_dir, backend) = backend();
        let mut service = TransactionService::load(&backend).unwrap();
        let today = CanonicalDate::today().to_display(DateFormat::DayMonthYear);
        service
            .add(&form("Coffee", "3.50", &today, TransactionType::Expense), DateFormat::DayMonthYear)
            .unwrap();
        let before = service.transactions().to_vec();

        let err = service.delete(TransactionId::new(42)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.transactions(), before.as_slice());

        let invalid = form("", "1", &today, TransactionType::Income);
        assert!(service.add(&invalid, DateFormat::DayMonthYear).is_err());
        assert_eq!(service.transactions(), before.as_slice());
    }
}
