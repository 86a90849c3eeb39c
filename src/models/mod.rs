//! Core data models for the expense ledger
//!
//! This module contains the value types of the ledger domain: money amounts,
//! expense identifiers, the category vocabulary, and the expense entities.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod summary;

pub use category::Category;
pub use expense::{
    normalize_amount, normalize_description, parse_date, Expense, ExpenseDraft, ExpensePatch,
    FieldUpdate, RawAmount,
};
pub use ids::ExpenseId;
pub use money::Money;
pub use summary::CategorySummary;
