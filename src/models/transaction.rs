//! Transaction model
//!
//! A single ledger entry: income or expense on a canonical date. Amounts are
//! stored signed (expenses negative) but every total uses the magnitude.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::date::CanonicalDate;
use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    /// Apply this type's sign convention to a positive magnitude
    pub fn signed(&self, magnitude: Money) -> Money {
        match self {
            Self::Income => magnitude.abs(),
            Self::Expense => -magnitude.abs(),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Backend-assigned id; absent until persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TransactionId>,

    /// Canonical transaction date
    pub date: CanonicalDate,

    /// Free text description
    pub description: String,

    /// Signed amount
    pub amount: Money,

    pub transaction_type: TransactionType,
}

impl Transaction {
    /// Create an unsaved transaction
    pub fn new(
        date: CanonicalDate,
        description: impl Into<String>,
        amount: Money,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            id: None,
            date,
            description: description.into(),
            amount,
            transaction_type,
        }
    }

    /// Attach an id
    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type.is_income()
    }

    pub fn is_expense(&self) -> bool {
        !self.is_income()
    }

    /// Magnitude used for every total
    pub fn magnitude(&self) -> Money {
        self.amount.abs()
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        if self.amount.is_zero() {
            return Err(TransactionValidationError::ZeroAmount);
        }
        if !self.amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }
        let sign_ok = match self.transaction_type {
            TransactionType::Income => self.amount.is_positive(),
            TransactionType::Expense => self.amount.is_negative(),
        };
        if !sign_ok {
            return Err(TransactionValidationError::SignMismatch {
                amount: self.amount,
                transaction_type: self.transaction_type,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.description, self.amount)
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    ZeroAmount,
    AmountTooLarge(Money),
    SignMismatch {
        amount: Money,
        transaction_type: TransactionType,
    },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description is required"),
            Self::ZeroAmount => write!(f, "Amount must not be zero"),
            Self::AmountTooLarge(amount) => write!(
                f,
                "Amount {} exceeds the limit of {}",
                amount,
                Money::MAX_MAGNITUDE
            ),
            Self::SignMismatch {
                amount,
                transaction_type,
            } => write!(
                f,
                "Amount {} does not match transaction type {}",
                amount, transaction_type
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
