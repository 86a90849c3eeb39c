//! Expense identifiers
//!
//! IDs are positive integers handed out by the storage layer. The newtype
//! keeps a raw integer from being used where a validated ID is expected.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, LedgerResult};

/// Identifier of a persisted expense (always >= 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    /// Validate a raw integer as an expense ID
    pub fn new(raw: i64) -> LedgerResult<Self> {
        if raw < 1 {
            return Err(LedgerError::InvalidExpenseId(format!(
                "Expense ID must be a positive integer. Got {} instead",
                raw
            )));
        }
        Ok(Self(raw as u64))
    }

    /// The first ID a fresh ledger hands out
    pub const fn first() -> Self {
        Self(1)
    }

    /// Get the underlying integer
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The ID that follows this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        let raw: i64 = s.parse().map_err(|_| {
            LedgerError::InvalidExpenseId(format!("Expense ID must be an integer. Got '{}'", s))
        })?;
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_ids() {
        assert_eq!(ExpenseId::new(1).unwrap().get(), 1);
        assert_eq!(ExpenseId::new(42).unwrap().to_string(), "42");
        assert_eq!(ExpenseId::first().next().get(), 2);
    }

    #[test]
    fn test_non_positive_ids_rejected() {
        assert!(matches!(
            ExpenseId::new(0),
            Err(LedgerError::InvalidExpenseId(_))
        ));
        assert!(matches!(
            ExpenseId::new(-3),
            Err(LedgerError::InvalidExpenseId(_))
        ));
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("7".parse::<ExpenseId>().unwrap().get(), 7);
        assert_eq!("#12".parse::<ExpenseId>().unwrap().get(), 12);
        assert!(matches!(
            "abc".parse::<ExpenseId>(),
            Err(LedgerError::InvalidExpenseId(_))
        ));
        assert!(matches!(
            "1.5".parse::<ExpenseId>(),
            Err(LedgerError::InvalidExpenseId(_))
        ));
        assert!("0".parse::<ExpenseId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = ExpenseId::new(9).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");
    }
}
