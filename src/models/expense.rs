//! Expense and ExpenseDraft models
//!
//! An `ExpenseDraft` is a validated candidate that has not been stored yet.
//! The storage layer turns it into an `Expense` once it has assigned an ID.
//! Both types keep their fields private so every change goes through the
//! validating setters below.

use chrono::{Local, NaiveDate};
use serde::Deserialize;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// Number of fields in a persisted expense row
pub const ROW_LEN: usize = 5;

/// Column names of a persisted expense row
pub const ROW_HEADER: [&str; ROW_LEN] = ["id", "amount", "category", "description", "date"];

/// An amount as received from a caller, before coercion
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Money> for RawAmount {
    fn from(value: Money) -> Self {
        Self::Text(value.to_decimal_string())
    }
}

/// Coerce and validate an amount
///
/// Fails with `InvalidAmount` if the value is absent, is not a number, or is
/// not positive once rounded to the cent.
pub fn normalize_amount(value: Option<&RawAmount>) -> LedgerResult<Money> {
    let value = value.ok_or_else(|| LedgerError::InvalidAmount("Amount is required".into()))?;

    let money = match value {
        RawAmount::Number(n) => Money::from_f64(*n),
        RawAmount::Text(s) => Money::parse(s),
    }
    .map_err(|e| LedgerError::InvalidAmount(format!("Amount must be a number. {}", e)))?;

    ensure_positive(money)
}

fn ensure_positive(amount: Money) -> LedgerResult<Money> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(format!(
            "Amount must be positive. Got {} instead",
            amount.to_decimal_string()
        )));
    }
    if !amount.is_within_bounds() {
        return Err(LedgerError::InvalidAmount(format!(
            "Amount must not exceed {}. Got {} instead",
            Money::MAX.to_decimal_string(),
            amount.to_decimal_string()
        )));
    }
    Ok(amount)
}

/// Trim a description and reject it if nothing is left
pub fn normalize_description(description: &str) -> LedgerResult<String> {
    let description = description.trim();
    if description.is_empty() {
        return Err(LedgerError::InvalidDescription(
            "Description must be a non-empty string".into(),
        ));
    }
    Ok(description.to_string())
}

/// Parse an ISO `YYYY-MM-DD` calendar date
pub fn parse_date(text: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::InvalidDate(format!(
            "Date must be a calendar date (YYYY-MM-DD). Got '{}' instead",
            text
        ))
    })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A validated expense that has not been assigned an ID yet
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    amount: Money,
    category: Category,
    description: String,
    date: NaiveDate,
}

impl ExpenseDraft {
    /// Create a draft; the date defaults to today
    pub fn new(
        amount: Money,
        category: Category,
        description: &str,
        date: Option<NaiveDate>,
    ) -> LedgerResult<Self> {
        Ok(Self {
            amount: ensure_positive(amount)?,
            category,
            description: normalize_description(description)?,
            date: date.unwrap_or_else(today),
        })
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Promote the draft once storage has handed out its ID
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
        }
    }
}

/// A stored expense
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    id: ExpenseId,
    amount: Money,
    category: Category,
    description: String,
    date: NaiveDate,
}

impl Expense {
    /// Create an expense with a known ID; the date defaults to today
    pub fn new(
        id: ExpenseId,
        amount: Money,
        category: Category,
        description: &str,
        date: Option<NaiveDate>,
    ) -> LedgerResult<Self> {
        Ok(ExpenseDraft::new(amount, category, description, date)?.into_expense(id))
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Set a new amount. Returns `false` if it already had that value.
    pub fn correct_amount(&mut self, amount: Money) -> LedgerResult<bool> {
        let amount = ensure_positive(amount)?;
        if amount == self.amount {
            return Ok(false);
        }
        self.amount = amount;
        Ok(true)
    }

    /// Move to another category. Returns `false` if nothing changed.
    pub fn recategorize(&mut self, category: Category) -> bool {
        if category == self.category {
            return false;
        }
        self.category = category;
        true
    }

    /// Replace the description. Returns `false` if nothing changed.
    pub fn correct_description(&mut self, description: &str) -> LedgerResult<bool> {
        let description = normalize_description(description)?;
        if description == self.description {
            return Ok(false);
        }
        self.description = description;
        Ok(true)
    }

    /// Move to another date. Returns `false` if nothing changed.
    pub fn correct_date(&mut self, date: NaiveDate) -> bool {
        if date == self.date {
            return false;
        }
        self.date = date;
        true
    }

    /// True if applying `update` would change nothing
    pub fn already_has(&self, update: &FieldUpdate) -> bool {
        match update {
            FieldUpdate::Amount(amount) => *amount == self.amount,
            FieldUpdate::Category(category) => *category == self.category,
            FieldUpdate::Description(description) => *description == self.description,
            FieldUpdate::Date(date) => *date == self.date,
        }
    }

    /// Apply a field change through the matching corrective method
    pub fn apply(&mut self, update: &FieldUpdate) -> LedgerResult<bool> {
        match update {
            FieldUpdate::Amount(amount) => self.correct_amount(*amount),
            FieldUpdate::Category(category) => Ok(self.recategorize(*category)),
            FieldUpdate::Description(description) => self.correct_description(description),
            FieldUpdate::Date(date) => Ok(self.correct_date(*date)),
        }
    }

    /// Flatten into the persisted field order: id, amount, category, description, date
    pub fn to_row(&self) -> [String; ROW_LEN] {
        [
            self.id.to_string(),
            self.amount.to_decimal_string(),
            self.category.name().to_string(),
            self.description.clone(),
            self.date.format("%Y-%m-%d").to_string(),
        ]
    }

    /// Rebuild an expense from a persisted row, validating every field
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> LedgerResult<Self> {
        if row.len() != ROW_LEN {
            return Err(LedgerError::CorruptedData(format!(
                "Expected {} fields, found {}",
                ROW_LEN,
                row.len()
            )));
        }

        let id: ExpenseId = row[0].as_ref().parse()?;
        let amount = normalize_amount(Some(&RawAmount::from(row[1].as_ref())))?;
        let category = Category::parse(row[2].as_ref())?;
        let date = parse_date(row[4].as_ref())?;

        Self::new(id, amount, category, row[3].as_ref(), Some(date))
    }
}

/// A single validated field change
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Amount(Money),
    Category(Category),
    Description(String),
    Date(NaiveDate),
}

impl FieldUpdate {
    /// Column name of the field being changed
    pub fn field_name(&self) -> &'static str {
        ROW_HEADER[self.column()]
    }

    /// Column position in a persisted row
    pub fn column(&self) -> usize {
        match self {
            Self::Amount(_) => 1,
            Self::Category(_) => 2,
            Self::Description(_) => 3,
            Self::Date(_) => 4,
        }
    }

    /// The new value in its persisted text form
    pub fn persisted_value(&self) -> String {
        match self {
            Self::Amount(amount) => amount.to_decimal_string(),
            Self::Category(category) => category.name().to_string(),
            Self::Description(description) => description.clone(),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// A partial update addressed at one expense
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub amount: Option<RawAmount>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl ExpensePatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: impl Into<RawAmount>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }
}
