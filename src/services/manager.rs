//! In-memory ledger
//!
//! `ExpenseManager` holds the working copy of every expense keyed by ID and
//! enforces the domain rules. It performs no I/O; keeping it equal to the
//! durable copy is the job of [`super::ExpenseService`].
//!
//! Every correction is split in two steps. A `prepare_*` method looks the
//! expense up and validates the new value into a [`FieldUpdate`] without
//! touching the ledger; [`ExpenseManager::apply_update`] then applies it. The
//! service persists the update between the two.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    normalize_amount, normalize_description, Category, CategorySummary, Expense, ExpenseDraft,
    ExpenseId, FieldUpdate, RawAmount,
};

/// Owns the ledger map
#[derive(Debug, Default)]
pub struct ExpenseManager {
    ledger: HashMap<ExpenseId, Expense>,
}

impl ExpenseManager {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate a ledger from previously stored expenses
    pub fn from_expenses(expenses: impl IntoIterator<Item = Expense>) -> Self {
        Self {
            ledger: expenses.into_iter().map(|e| (e.id(), e)).collect(),
        }
    }

    /// Validate a new expense without giving it an identity
    pub fn create_draft(
        &self,
        amount: impl Into<RawAmount>,
        category: &str,
        description: &str,
        date: Option<NaiveDate>,
    ) -> LedgerResult<ExpenseDraft> {
        let category = Category::parse(category)?;
        let amount = normalize_amount(Some(&amount.into()))?;
        ExpenseDraft::new(amount, category, description, date)
    }

    /// Add an expense that already has its ID; replaces any entry with that ID
    pub fn attach_expense(&mut self, expense: Expense) {
        self.ledger.insert(expense.id(), expense);
    }

    /// Look up an expense
    pub fn get_expense(&self, id: ExpenseId) -> LedgerResult<&Expense> {
        self.ledger
            .get(&id)
            .ok_or_else(|| LedgerError::expense_not_found(id))
    }

    fn get_expense_mut(&mut self, id: ExpenseId) -> LedgerResult<&mut Expense> {
        self.ledger
            .get_mut(&id)
            .ok_or_else(|| LedgerError::expense_not_found(id))
    }

    /// Remove an expense and return it
    pub fn delete_expense(&mut self, id: ExpenseId) -> LedgerResult<Expense> {
        self.ledger
            .remove(&id)
            .ok_or_else(|| LedgerError::expense_not_found(id))
    }

    /// Validate a new amount for an existing expense
    pub fn prepare_amount(
        &self,
        id: ExpenseId,
        amount: impl Into<RawAmount>,
    ) -> LedgerResult<FieldUpdate> {
        self.get_expense(id)?;
        Ok(FieldUpdate::Amount(normalize_amount(Some(&amount.into()))?))
    }

    /// Validate a new category against the vocabulary
    pub fn prepare_category(&self, id: ExpenseId, category: &str) -> LedgerResult<FieldUpdate> {
        self.get_expense(id)?;
        Ok(FieldUpdate::Category(Category::parse(category)?))
    }

    pub fn prepare_description(
        &self,
        id: ExpenseId,
        description: &str,
    ) -> LedgerResult<FieldUpdate> {
        self.get_expense(id)?;
        Ok(FieldUpdate::Description(normalize_description(description)?))
    }

    pub fn prepare_date(&self, id: ExpenseId, date: NaiveDate) -> LedgerResult<FieldUpdate> {
        self.get_expense(id)?;
        Ok(FieldUpdate::Date(date))
    }

    pub fn correct_amount(
        &mut self,
        id: ExpenseId,
        amount: impl Into<RawAmount>,
    ) -> LedgerResult<bool> {
        let update = self.prepare_amount(id, amount)?;
        self.apply_update(id, &update)
    }

    /// Move an expense to another category, checked against the vocabulary
    pub fn recategorize(&mut self, id: ExpenseId, category: &str) -> LedgerResult<bool> {
        let update = self.prepare_category(id, category)?;
        self.apply_update(id, &update)
    }

    pub fn correct_description(&mut self, id: ExpenseId, description: &str) -> LedgerResult<bool> {
        let update = self.prepare_description(id, description)?;
        self.apply_update(id, &update)
    }

    pub fn correct_date(&mut self, id: ExpenseId, date: NaiveDate) -> LedgerResult<bool> {
        let update = self.prepare_date(id, date)?;
        self.apply_update(id, &update)
    }

    /// Apply a field change produced by one of the `prepare_*` methods
    pub fn apply_update(&mut self, id: ExpenseId, update: &FieldUpdate) -> LedgerResult<bool> {
        self.get_expense_mut(id)?.apply(update)
    }

    /// Snapshot of every expense, ordered by ID
    pub fn export_expense_list(&self) -> Vec<Expense> {
        let mut expenses: Vec<Expense> = self.ledger.values().cloned().collect();
        expenses.sort_by_key(|e| e.id());
        expenses
    }

    /// Totals for every category in the vocabulary
    pub fn category_summary(&self) -> LedgerResult<CategorySummary> {
        CategorySummary::from_expenses(self.ledger.values())
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }
}
