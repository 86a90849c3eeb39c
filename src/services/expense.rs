//! Expense service
//!
//! The single entry point used by the CLI and the HTTP API. Every mutation
//! follows the same order:
//!
//! 1. look the expense up and validate the new value(s) through the
//!    manager's `prepare_*` methods,
//! 2. write to the store,
//! 3. apply the change to the in-memory ledger.
//!
//! A failed store write therefore leaves the in-memory ledger untouched.
//! Corrections that would not change anything skip the store entirely.
//!
//! [`ExpenseService::apply_patch`] validates every supplied field before it
//! writes any of them, then applies them one field at a time in the order
//! amount, category, description, date. Each field is its own store write,
//! so a store failure part-way through leaves the earlier fields applied in
//! memory and on disk.

use chrono::NaiveDate;
use tracing::debug;

use super::manager::ExpenseManager;
use crate::error::LedgerResult;
use crate::models::{CategorySummary, Expense, ExpenseId, ExpensePatch, FieldUpdate, RawAmount};
use crate::storage::ExpenseStore;

/// Keeps the in-memory ledger and the durable store in step
pub struct ExpenseService<S: ExpenseStore> {
    manager: ExpenseManager,
    store: S,
}

impl<S: ExpenseStore> ExpenseService<S> {
    /// Prepare the store and load the ledger from it
    pub fn open(mut store: S) -> LedgerResult<Self> {
        store.ensure_schema()?;
        let expenses = store.select_all()?;
        debug!(count = expenses.len(), "Ledger loaded");

        Ok(Self {
            manager: ExpenseManager::from_expenses(expenses),
            store,
        })
    }

    /// Record a new expense and return its ID
    pub fn add_expense(
        &mut self,
        amount: impl Into<RawAmount>,
        category: &str,
        description: &str,
        date: Option<NaiveDate>,
    ) -> LedgerResult<ExpenseId> {
        let draft = self
            .manager
            .create_draft(amount, category, description, date)?;
        let expense = self.store.insert(&draft)?;
        let id = expense.id();

        self.manager.attach_expense(expense);
        debug!(%id, "Expense added");
        Ok(id)
    }

    /// Remove an expense and return it
    pub fn delete_expense(&mut self, id: ExpenseId) -> LedgerResult<Expense> {
        self.manager.get_expense(id)?;
        self.store.delete(id)?;

        let removed = self.manager.delete_expense(id)?;
        debug!(%id, "Expense deleted");
        Ok(removed)
    }

    /// Returns `false` if the amount was already `amount`
    pub fn correct_expense_amount(
        &mut self,
        id: ExpenseId,
        amount: impl Into<RawAmount>,
    ) -> LedgerResult<bool> {
        let update = self.manager.prepare_amount(id, amount)?;
        self.commit(id, update)
    }

    /// Returns `false` if the expense was already in `category`
    pub fn recategorize_expense(&mut self, id: ExpenseId, category: &str) -> LedgerResult<bool> {
        let update = self.manager.prepare_category(id, category)?;
        self.commit(id, update)
    }

    /// Returns `false` if the description was unchanged
    pub fn correct_expense_description(
        &mut self,
        id: ExpenseId,
        description: &str,
    ) -> LedgerResult<bool> {
        let update = self.manager.prepare_description(id, description)?;
        self.commit(id, update)
    }

    /// Returns `false` if the date was unchanged
    pub fn correct_expense_date(&mut self, id: ExpenseId, date: NaiveDate) -> LedgerResult<bool> {
        let update = self.manager.prepare_date(id, date)?;
        self.commit(id, update)
    }

    /// Apply several corrections at once
    ///
    /// Returns the names of the fields that actually changed, in the order
    /// they were written.
    pub fn apply_patch(
        &mut self,
        id: ExpenseId,
        patch: &ExpensePatch,
    ) -> LedgerResult<Vec<&'static str>> {
        self.manager.get_expense(id)?;

        let mut updates = Vec::with_capacity(4);
        if let Some(amount) = &patch.amount {
            updates.push(self.manager.prepare_amount(id, amount.clone())?);
        }
        if let Some(category) = &patch.category {
            updates.push(self.manager.prepare_category(id, category)?);
        }
        if let Some(description) = &patch.description {
            updates.push(self.manager.prepare_description(id, description)?);
        }
        if let Some(date) = patch.date {
            updates.push(self.manager.prepare_date(id, date)?);
        }

        let mut changed = Vec::with_capacity(updates.len());
        for update in updates {
            let field = update.field_name();
            if self.commit(id, update)? {
                changed.push(field);
            }
        }
        Ok(changed)
    }

    /// Every expense, ordered by ID
    pub fn list_expenses(&self) -> Vec<Expense> {
        self.manager.export_expense_list()
    }

    pub fn get_expense(&self, id: ExpenseId) -> LedgerResult<&Expense> {
        self.manager.get_expense(id)
    }

    /// Fails with `InvalidAmount` if a total is out of range
    pub fn category_summary(&self) -> LedgerResult<CategorySummary> {
        self.manager.category_summary()
    }

    /// The durable store behind this service
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist one validated change, then mirror it in memory
    fn commit(&mut self, id: ExpenseId, update: FieldUpdate) -> LedgerResult<bool> {
        if self.manager.get_expense(id)?.already_has(&update) {
            debug!(%id, field = update.field_name(), "Correction is a no-op");
            return Ok(false);
        }

        self.store.update_field(id, &update)?;
        let changed = self.manager.apply_update(id, &update)?;
        debug!(%id, field = update.field_name(), "Expense corrected");
        Ok(changed)
    }
}
