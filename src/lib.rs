//! Expense Ledger - personal expense tracking
//!
//! Records expenses (amount, category, description, date), lets mistakes be
//! corrected, and reports totals per category. The same ledger is reachable
//! from the `expense` command line and from an HTTP API.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Money, IDs, the category vocabulary, and expense entities
//! - `storage`: The durable CSV ledger behind the `ExpenseStore` trait
//! - `services`: In-memory ledger and the service keeping it in step with storage
//! - `cli`: Command handlers
//! - `display`: Terminal formatting
//! - `api`: HTTP router
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_ledger::config::LedgerPaths;
//! use expense_ledger::services::ExpenseService;
//! use expense_ledger::storage::CsvExpenseStore;
//!
//! # fn main() -> Result<(), expense_ledger::LedgerError> {
//! let paths = LedgerPaths::new()?;
//! let mut service = ExpenseService::open(CsvExpenseStore::new(paths.ledger_file()))?;
//! let id = service.add_expense(15.5, "Groceries", "Pizza", None)?;
//! println!("{}", service.get_expense(id)?.amount());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
