//! Expense CLI commands
//!
//! Implements the ledger subcommands on top of [`ExpenseService`].

use std::io::{self, BufRead, Write};

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_category_list, format_expense_details, format_expense_list, format_summary,
};
use crate::error::LedgerResult;
use crate::models::{parse_date, ExpenseId, ExpensePatch, RawAmount};
use crate::services::ExpenseService;
use crate::storage::ExpenseStore;

/// Ledger subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g., "15.50")
        amount: String,
        /// Category from the fixed vocabulary (see `categories`)
        #[arg(short, long)]
        category: String,
        /// What the money was spent on
        #[arg(short, long)]
        description: String,
        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List all expenses
    List,
    /// Show one expense
    Show {
        /// Expense ID
        id: String,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Correct one or more fields of an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Total spent per category
    Summary,
    /// List the allowed categories
    Categories,
}

/// Handle a ledger command
pub fn handle_expense_command<S: ExpenseStore>(
    service: &mut ExpenseService<S>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            description,
            date,
        } => {
            let date = date.as_deref().map(parse_date).transpose()?;
            let id = service.add_expense(RawAmount::Text(amount), &category, &description, date)?;
            let expense = service.get_expense(id)?;

            println!(
                "Added expense #{}: {} {} ({})",
                id,
                expense.amount().format_with_symbol(symbol),
                expense.description(),
                expense.category()
            );
        }

        ExpenseCommands::List => {
            print!("{}", format_expense_list(&service.list_expenses(), symbol));
        }

        ExpenseCommands::Show { id } => {
            let id: ExpenseId = id.parse()?;
            print!("{}", format_expense_details(service.get_expense(id)?, symbol));
        }

        ExpenseCommands::Delete { id, yes } => {
            let id: ExpenseId = id.parse()?;
            let expense = service.get_expense(id)?;

            if !yes {
                let question = format!(
                    "Delete expense #{} ({} {})?",
                    id,
                    expense.amount().format_with_symbol(symbol),
                    expense.description()
                );
                if !confirm(&question)? {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let removed = service.delete_expense(id)?;
            println!("Deleted expense #{}: {}", removed.id(), removed.description());
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            description,
            date,
        } => {
            let id: ExpenseId = id.parse()?;
            let patch = ExpensePatch {
                amount: amount.map(RawAmount::Text),
                category,
                description,
                date: date.as_deref().map(parse_date).transpose()?,
            };

            if patch.is_empty() {
                println!(
                    "No changes specified. Use --amount, --category, --description or --date."
                );
                return Ok(());
            }

            let changed = service.apply_patch(id, &patch)?;
            if changed.is_empty() {
                println!("Expense #{} already has those values.", id);
            } else {
                println!("Updated expense #{}: {}", id, changed.join(", "));
            }
            print!("{}", format_expense_details(service.get_expense(id)?, symbol));
        }

        ExpenseCommands::Summary => {
            print!("{}", format_summary(&service.category_summary()?, symbol));
        }

        ExpenseCommands::Categories => {
            print!("{}", format_category_list());
        }
    }

    Ok(())
}

/// Ask a yes/no question on stdin; anything but "y"/"yes" is a no
fn confirm(question: &str) -> LedgerResult<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

