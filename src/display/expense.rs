//! Expense display formatting
//!
//! Formats expenses for terminal output in table and detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Expense;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl ExpenseRow {
    fn new(expense: &Expense, currency_symbol: &str) -> Self {
        Self {
            id: expense.id().to_string(),
            date: expense.date().format("%Y-%m-%d").to_string(),
            category: expense.category().to_string(),
            amount: expense.amount().format_with_symbol(currency_symbol),
            description: expense.description().to_string(),
        }
    }
}

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], currency_symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let rows = expenses
        .iter()
        .map(|e| ExpenseRow::new(e, currency_symbol));

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense #{}\n", expense.id()));
    output.push_str(&format!(
        "  Amount:       {}\n",
        expense.amount().format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("  Category:     {}\n", expense.category()));
    output.push_str(&format!("  Description:  {}\n", expense.description()));
    output.push_str(&format!(
        "  Date:         {}\n",
        expense.date().format("%Y-%m-%d")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseId, Money};
    use chrono::NaiveDate;

    fn pizza() -> Expense {
        Expense::new(
            ExpenseId::new(7).unwrap(),
            Money::from_cents(1550),
            Category::Groceries,
            "Pizza",
            NaiveDate::from_ymd_opt(2026, 1, 27),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_expense_list(&[], "$"), "No expenses recorded.\n");
    }

    #[test]
    fn test_list_contains_fields() {
        let output = format_expense_list(&[pizza()], "$");
        assert!(output.contains("Description"));
        assert!(output.contains("Groceries"));
        assert!(output.contains("$15.50"));
        assert!(output.contains("2026-01-27"));
        assert!(output.contains("Pizza"));
    }

    #[test]
    fn test_details_use_symbol() {
        let output = format_expense_details(&pizza(), "€");
        assert!(output.starts_with("Expense #7\n"));
        assert!(output.contains("€15.50"));
        assert!(output.contains("Date:         2026-01-27"));
    }
}
