//! Custom error types for the expense ledger
//!
//! This module defines the error taxonomy shared by the entity layer, the
//! ledger manager, the storage gateway, and the presentation layers.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Expense ID is not a positive integer
    #[error("Invalid expense ID: {0}")]
    InvalidExpenseId(String),

    /// Amount is missing, not a number, or not positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Category is empty or outside the vocabulary
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// Description is empty
    #[error("Invalid description: {0}")]
    InvalidDescription(String),

    /// Date is not a calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Persisted data cannot be trusted
    #[error("Corrupted data: {0}")]
    CorruptedData(String),

    /// Durable write or read failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl LedgerError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error raised before any mutation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidExpenseId(_)
                | Self::InvalidAmount(_)
                | Self::InvalidCategory(_)
                | Self::InvalidDescription(_)
                | Self::InvalidDate(_)
        )
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
