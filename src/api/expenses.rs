//! Expense endpoints

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiState};
use crate::error::LedgerError;
use crate::models::{
    parse_date, Category, CategorySummary, Expense, ExpenseId, ExpensePatch, RawAmount,
};

/// Body of `POST /expenses`
#[derive(Debug, Deserialize)]
pub struct ExpenseCreate {
    #[serde(default)]
    pub amount: Option<RawAmount>,
    pub category: String,
    pub description: String,
    /// `YYYY-MM-DD`; today when absent
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseCreated {
    pub id: u64,
}

/// Body of `PATCH /expenses/{id}`; absent fields are left alone
#[derive(Debug, Default, Deserialize)]
pub struct ExpensePatchBody {
    #[serde(default)]
    pub amount: Option<RawAmount>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl ExpensePatchBody {
    fn into_patch(self) -> Result<ExpensePatch, ApiError> {
        Ok(ExpensePatch {
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date.as_deref().map(parse_date).transpose()?,
        })
    }
}

/// An expense as returned by the API
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ExpenseView {
    pub id: u64,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl From<&Expense> for ExpenseView {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id().get(),
            amount: expense.amount().as_f64(),
            category: expense.category().name().to_string(),
            description: expense.description().to_string(),
            date: expense.date(),
        }
    }
}

/// Body of `GET /summary`
#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub categories: BTreeMap<Category, f64>,
    pub total: f64,
}

impl From<&CategorySummary> for SummaryView {
    fn from(summary: &CategorySummary) -> Self {
        Self {
            categories: summary.iter().map(|(c, m)| (c, m.as_f64())).collect(),
            total: summary.total().as_f64(),
        }
    }
}

pub async fn create(
    State(state): State<ApiState>,
    Json(payload): Json<ExpenseCreate>,
) -> Result<(StatusCode, Json<ExpenseCreated>), ApiError> {
    let date = payload.date.as_deref().map(parse_date).transpose()?;
    let amount = payload
        .amount
        .ok_or_else(|| LedgerError::InvalidAmount("Amount is required".to_string()))?;

    let id = state.service()?.add_expense(
        amount,
        &payload.category,
        &payload.description,
        date,
    )?;

    Ok((StatusCode::CREATED, Json(ExpenseCreated { id: id.get() })))
}

pub async fn list(State(state): State<ApiState>) -> Result<Json<Vec<ExpenseView>>, ApiError> {
    let expenses = state.service()?.list_expenses();
    Ok(Json(expenses.iter().map(ExpenseView::from).collect()))
}

pub async fn get_one(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseView>, ApiError> {
    let id: ExpenseId = id.parse()?;
    let service = state.service()?;
    let view = ExpenseView::from(service.get_expense(id)?);
    Ok(Json(view))
}

pub async fn patch(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpensePatchBody>,
) -> Result<Json<ExpenseView>, ApiError> {
    let id: ExpenseId = id.parse()?;
    let patch = payload.into_patch()?;
    if patch.is_empty() {
        return Err(ApiError::BadRequest("Found nothing to update".to_string()));
    }

    let mut service = state.service()?;
    let changed = service.apply_patch(id, &patch)?;
    tracing::debug!(%id, ?changed, "patched");

    let view = ExpenseView::from(service.get_expense(id)?);
    Ok(Json(view))
}

pub async fn delete(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: ExpenseId = id.parse()?;
    state.service()?.delete_expense(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn summary(State(state): State<ApiState>) -> Result<Json<SummaryView>, ApiError> {
    let summary = state.service()?.category_summary()?;
    Ok(Json(SummaryView::from(&summary)))
}

pub async fn categories() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(|c| c.name()).collect())
}
