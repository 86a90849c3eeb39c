//! Interactive menu
//!
//! A prompt loop over the same [`ExpenseService`] the subcommands use. Input
//! and output are generic so the loop can be driven from tests.
//!
//! Errors from a single action are printed and the menu comes back. Only a
//! failure of the terminal itself ends the session early. End of input exits.

use std::io::{BufRead, Write};

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list, format_summary};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_date, Category, ExpenseId, RawAmount};
use crate::services::ExpenseService;
use crate::storage::ExpenseStore;

const MENU: &str = "\
What would you like to do?
  1) List expenses
  2) Add an expense
  3) Correct an expense
  4) Delete an expense
  5) Show summary
  6) Exit
";

const FIELD_PROMPT: &str =
    "Correct which field? 1) amount 2) category 3) description 4) date (blank when done): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Add,
    Correct,
    Delete,
    Summary,
    Exit,
}

impl Action {
    fn parse(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "1" | "list" => Some(Self::List),
            "2" | "add" => Some(Self::Add),
            "3" | "correct" | "edit" => Some(Self::Correct),
            "4" | "delete" => Some(Self::Delete),
            "5" | "summary" => Some(Self::Summary),
            "6" | "exit" | "quit" | "q" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Field picked in the correction loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Amount,
    Category,
    Description,
    Date,
}

impl Field {
    fn parse(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "1" | "amount" => Some(Self::Amount),
            "2" | "category" => Some(Self::Category),
            "3" | "description" => Some(Self::Description),
            "4" | "date" => Some(Self::Date),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Description => "description",
            Self::Date => "date",
        }
    }
}

/// Run the menu until the user exits or input ends
pub fn run_interactive<S, R, W>(
    service: &mut ExpenseService<S>,
    settings: &Settings,
    input: R,
    output: W,
) -> LedgerResult<()>
where
    S: ExpenseStore,
    R: BufRead,
    W: Write,
{
    let mut session = Session {
        service,
        symbol: settings.currency_symbol.as_str(),
        input,
        output,
    };
    session.run()
}

struct Session<'a, S: ExpenseStore, R, W> {
    service: &'a mut ExpenseService<S>,
    symbol: &'a str,
    input: R,
    output: W,
}

impl<S: ExpenseStore, R: BufRead, W: Write> Session<'_, S, R, W> {
    fn run(&mut self) -> LedgerResult<()> {
        writeln!(self.output, "Expense Ledger - track what you spend")?;

        loop {
            writeln!(self.output)?;
            write!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("> ")? else {
                return Ok(());
            };

            let result = match Action::parse(&choice) {
                Some(Action::List) => self.list(),
                Some(Action::Add) => self.add(),
                Some(Action::Correct) => self.correct(),
                Some(Action::Delete) => self.delete(),
                Some(Action::Summary) => self.summary(),
                Some(Action::Exit) => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                None => {
                    writeln!(self.output, "Unknown choice '{}'", choice.trim())?;
                    Ok(())
                }
            };

            match result {
                Err(LedgerError::Io(err)) => return Err(LedgerError::Io(err)),
                Err(err) => writeln!(self.output, "Error: {}", err)?,
                Ok(()) => {}
            }
        }
    }

    /// Print `message` and read one line; `None` at end of input
    fn prompt(&mut self, message: &str) -> LedgerResult<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Session::prompt`], but a blank answer is `None` too
    fn prompt_value(&mut self, message: &str) -> LedgerResult<Option<String>> {
        Ok(self.prompt(message)?.filter(|answer| !answer.is_empty()))
    }

    fn list(&mut self) -> LedgerResult<()> {
        let listing = format_expense_list(&self.service.list_expenses(), self.symbol);
        write!(self.output, "{}", listing)?;
        Ok(())
    }

    fn add(&mut self) -> LedgerResult<()> {
        let Some(amount) = self.prompt_value("Amount (blank to cancel): ")? else {
            return self.cancelled();
        };
        let Some(category) = self.pick_category()? else {
            return self.cancelled();
        };
        let Some(description) = self.prompt_value("Description: ")? else {
            return self.cancelled();
        };
        let date = self
            .prompt_value("Date (YYYY-MM-DD, blank for today): ")?
            .as_deref()
            .map(parse_date)
            .transpose()?;

        let id = self
            .service
            .add_expense(RawAmount::Text(amount), &category, &description, date)?;
        writeln!(self.output, "Added expense #{}", id)?;
        Ok(())
    }

    fn pick_category(&mut self) -> LedgerResult<Option<String>> {
        for (i, category) in Category::ALL.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, category)?;
        }
        let Some(answer) = self.prompt_value("Category: ")? else {
            return Ok(None);
        };

        // A menu number picks from the list; anything else is taken as a name
        let picked = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Category::ALL.get(i))
            .map(|category| category.name().to_string());
        Ok(Some(picked.unwrap_or(answer)))
    }

    /// List the ledger and ask for an ID; `None` if the ledger is empty or
    /// the user backs out
    fn pick_expense(&mut self, verb: &str) -> LedgerResult<Option<ExpenseId>> {
        let expenses = self.service.list_expenses();
        write!(self.output, "{}", format_expense_list(&expenses, self.symbol))?;
        if expenses.is_empty() {
            return Ok(None);
        }

        let message = format!("ID of the expense to {} (blank to cancel): ", verb);
        let Some(answer) = self.prompt_value(&message)? else {
            self.cancelled()?;
            return Ok(None);
        };

        let id: ExpenseId = answer.parse()?;
        self.service.get_expense(id)?;
        Ok(Some(id))
    }

    fn correct(&mut self) -> LedgerResult<()> {
        let Some(id) = self.pick_expense("correct")? else {
            return Ok(());
        };

        loop {
            let Some(answer) = self.prompt_value(FIELD_PROMPT)? else {
                return Ok(());
            };

            let Some(field) = Field::parse(&answer) else {
                writeln!(self.output, "Unknown field '{}'", answer)?;
                continue;
            };

            // A bad value is reported and the field menu comes back
            if let Err(err) = self.correct_field(id, field) {
                if let LedgerError::Io(_) = err {
                    return Err(err);
                }
                writeln!(self.output, "Error: {}", err)?;
            }
        }
    }

    fn correct_field(&mut self, id: ExpenseId, field: Field) -> LedgerResult<()> {
        let expense = self.service.get_expense(id)?;
        let current = match field {
            Field::Amount => expense.amount().format_with_symbol(self.symbol),
            Field::Category => expense.category().to_string(),
            Field::Description => expense.description().to_string(),
            Field::Date => expense.date().to_string(),
        };
        writeln!(self.output, "Current {}: {}", field.label(), current)?;

        let message = format!("New {} (blank to keep): ", field.label());
        let Some(value) = self.prompt_value(&message)? else {
            writeln!(self.output, "Kept the current {}.", field.label())?;
            return Ok(());
        };

        let changed = match field {
            Field::Amount => self
                .service
                .correct_expense_amount(id, RawAmount::Text(value))?,
            Field::Category => self.service.recategorize_expense(id, &value)?,
            Field::Description => self.service.correct_expense_description(id, &value)?,
            Field::Date => self.service.correct_expense_date(id, parse_date(&value)?)?,
        };

        if changed {
            writeln!(self.output, "Expense #{} corrected.", id)?;
        } else {
            writeln!(self.output, "Expense #{} already has that {}.", id, field.label())?;
        }
        Ok(())
    }

    fn delete(&mut self) -> LedgerResult<()> {
        let Some(id) = self.pick_expense("delete")? else {
            return Ok(());
        };

        let details = format_expense_details(self.service.get_expense(id)?, self.symbol);
        write!(self.output, "{}", details)?;

        let answer = self.prompt(&format!("Delete expense #{}? [y/N] ", id))?;
        let confirmed = answer
            .map(|a| matches!(a.to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false);
        if !confirmed {
            writeln!(self.output, "Deletion cancelled.")?;
            return Ok(());
        }

        let removed = self.service.delete_expense(id)?;
        writeln!(
            self.output,
            "Deleted expense #{}: {}",
            removed.id(),
            removed.description()
        )?;
        Ok(())
    }

    fn summary(&mut self) -> LedgerResult<()> {
        let summary = self.service.category_summary()?;
        write!(self.output, "{}", format_summary(&summary, self.symbol))?;
        Ok(())
    }

    fn cancelled(&mut self) -> LedgerResult<()> {
        writeln!(self.output, "Cancelled.")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CsvExpenseStore;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_service() -> (TempDir, ExpenseService<CsvExpenseStore>) {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvExpenseStore::new(temp_dir.path().join("expenses.csv"));
        let service = ExpenseService::open(store).unwrap();
        (temp_dir, service)
    }

    fn run(service: &mut ExpenseService<CsvExpenseStore>, input: &str) -> String {
        let mut output = Vec::new();
        run_interactive(
            service,
            &Settings::default(),
            Cursor::new(input.as_bytes()),
            &mut output,
        )
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn seed(service: &mut ExpenseService<CsvExpenseStore>) -> ExpenseId {
        service
            .add_expense(15.5, "Groceries", "Pizza", parse_date("2026-01-27").ok())
            .unwrap()
    }

    #[test]
    fn test_exit_and_end_of_input() {
        let (_temp_dir, mut service) = create_test_service();

        let output = run(&mut service, "6\n");
        assert!(output.contains("What would you like to do?"));
        assert!(output.ends_with("Goodbye!\n"));

        let output = run(&mut service, "");
        assert!(!output.contains("Goodbye!"));
    }

    #[test]
    fn test_add_by_category_number() {
        let (_temp_dir, mut service) = create_test_service();

        let output = run(&mut service, "2\n15.50\n1\nPizza\n2026-01-27\n1\nexit\n");

        assert!(output.contains("Added expense #1"));
        let expense = service.get_expense(ExpenseId::first()).unwrap();
        assert_eq!(expense.category(), Category::ALL[0]);
        assert_eq!(expense.amount().cents(), 1550);
        assert!(output.contains("Pizza"));
    }

    #[test]
    fn test_add_errors_return_to_menu() {
        let (_temp_dir, mut service) = create_test_service();

        let output = run(&mut service, "add\n-5\nGroceries\nPizza\n\nlist\n6\n");

        assert!(output.contains("Error: "));
        assert!(output.contains("No expenses recorded."));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_add_blank_amount_cancels() {
        let (_temp_dir, mut service) = create_test_service();

        let output = run(&mut service, "2\n\n6\n");

        assert!(output.contains("Cancelled."));
        assert!(service.list_expenses().is_empty());
    }

    #[test]
    fn test_correct_shows_current_value_and_loops() {
        let (_temp_dir, mut service) = create_test_service();
        let id = seed(&mut service);

        let output = run(
            &mut service,
            "3\n1\namount\n18.00\ndescription\n\ncategory\nNotARealCategory\n\n6\n",
        );

        assert!(output.contains("Current amount: $15.50"));
        assert!(output.contains("Expense #1 corrected."));
        assert!(output.contains("Current description: Pizza"));
        assert!(output.contains("Kept the current description."));
        assert!(output.contains("Error: "));

        let expense = service.get_expense(id).unwrap();
        assert_eq!(expense.amount().cents(), 1800);
        assert_eq!(expense.description(), "Pizza");
        assert_eq!(expense.category(), Category::Groceries);
    }

    #[test]
    fn test_correct_same_value_reports_no_change() {
        let (_temp_dir, mut service) = create_test_service();
        seed(&mut service);

        let output = run(&mut service, "3\n1\n4\n2026-01-27\n\n6\n");

        assert!(output.contains("Current date: 2026-01-27"));
        assert!(output.contains("Expense #1 already has that date."));
    }

    #[test]
    fn test_correct_unknown_id_is_an_error() {
        let (_temp_dir, mut service) = create_test_service();
        seed(&mut service);

        let output = run(&mut service, "3\n99\n6\n");

        assert!(output.contains("Error: "));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let (_temp_dir, mut service) = create_test_service();
        let id = seed(&mut service);

        let output = run(&mut service, "4\n1\nn\n6\n");
        assert!(output.contains("Deletion cancelled."));
        assert!(service.get_expense(id).is_ok());

        let output = run(&mut service, "4\n1\ny\n6\n");
        assert!(output.contains("Deleted expense #1: Pizza"));
        assert!(service.list_expenses().is_empty());
    }

    #[test]
    fn test_summary_and_unknown_choice() {
        let (_temp_dir, mut service) = create_test_service();
        seed(&mut service);

        let output = run(&mut service, "7\nsummary\n6\n");

        assert!(output.contains("Unknown choice '7'"));
        assert!(output.contains("$15.50"));
    }
}
