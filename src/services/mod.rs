//! Service layer for the expense ledger
//!
//! `ExpenseManager` owns the in-memory ledger and its rules;
//! `ExpenseService` pairs it with a durable store.

pub mod expense;
pub mod manager;

pub use expense::ExpenseService;
pub use manager::ExpenseManager;
