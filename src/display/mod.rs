//! Display formatting for terminal output
//!
//! Turns ledger models into the plain text the CLI prints.

pub mod expense;
pub mod summary;

pub use expense::{format_expense_details, format_expense_list};
pub use summary::{format_category_list, format_summary};
