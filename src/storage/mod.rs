//! Storage layer for the expense ledger
//!
//! The service talks to storage through [`ExpenseStore`]. Each call performs
//! one durable operation on one record; nothing groups several calls into a
//! transaction. The shipped backend is [`CsvExpenseStore`].

pub mod csv_store;
pub mod file_io;

pub use csv_store::CsvExpenseStore;
pub use file_io::{read_if_exists, write_atomic};

use crate::error::LedgerResult;
use crate::models::{Expense, ExpenseDraft, ExpenseId};

pub use crate::models::FieldUpdate;

/// Durable copy of the ledger
pub trait ExpenseStore {
    /// One-time initialization of the backing store
    fn ensure_schema(&mut self) -> LedgerResult<()>;

    /// Store a draft under a fresh ID and return the identified expense
    ///
    /// IDs increase monotonically and are never reused, even after deletes.
    fn insert(&mut self, draft: &ExpenseDraft) -> LedgerResult<Expense>;

    /// Load every valid record; invalid records are skipped
    fn select_all(&self) -> LedgerResult<Vec<Expense>>;

    /// Overwrite one field of one record. Unknown IDs are ignored.
    fn update_field(&mut self, id: ExpenseId, update: &FieldUpdate) -> LedgerResult<()>;

    /// Remove one record. Unknown IDs are ignored.
    fn delete(&mut self, id: ExpenseId) -> LedgerResult<()>;
}
