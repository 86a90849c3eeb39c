//! HTTP API
//!
//! An axum router over a shared [`ExpenseService`]. The service sits behind
//! one mutex per ledger, held for the whole of each request's
//! validate/write/apply sequence.

mod expenses;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::error::LedgerError;
use crate::services::ExpenseService;
use crate::storage::CsvExpenseStore;

pub use expenses::{ExpenseCreate, ExpenseCreated, ExpensePatchBody, ExpenseView, SummaryView};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ApiState {
    service: Arc<Mutex<ExpenseService<CsvExpenseStore>>>,
}

impl ApiState {
    pub fn new(service: ExpenseService<CsvExpenseStore>) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }

    fn service(&self) -> Result<MutexGuard<'_, ExpenseService<CsvExpenseStore>>, ApiError> {
        self.service
            .lock()
            .map_err(|_| ApiError::Internal("ledger lock poisoned".to_string()))
    }
}

/// Errors returned by handlers
#[derive(Debug)]
pub enum ApiError {
    Ledger(LedgerError),
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn status_for_ledger_error(err: &LedgerError) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Ledger(err) => {
                let status = status_for_ledger_error(&err);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!("ledger error: {err}");
                    (status, "internal server error".to_string())
                } else {
                    (status, err.to_string())
                }
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(value: LedgerError) -> Self {
        Self::Ledger(value)
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    tracing::info!(%method, %path, status = response.status().as_u16(), "request");
    response
}

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Hello world!" }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the router for a ledger
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route(
            "/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/expenses/{id}",
            get(expenses::get_one)
                .patch(expenses::patch)
                .delete(expenses::delete),
        )
        .route("/summary", get(expenses::summary))
        .route("/categories", get(expenses::categories))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn run_with_listener(
    service: ExpenseService<CsvExpenseStore>,
    listener: TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ApiState::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let res = ApiError::from(LedgerError::expense_not_found(3)).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        for err in [
            LedgerError::InvalidAmount("x".into()),
            LedgerError::InvalidCategory("x".into()),
            LedgerError::InvalidDescription("x".into()),
            LedgerError::InvalidDate("x".into()),
            LedgerError::InvalidExpenseId("x".into()),
        ] {
            let res = ApiError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn storage_maps_to_500() {
        for err in [
            LedgerError::Storage("disk".into()),
            LedgerError::CorruptedData("row".into()),
            LedgerError::Io("io".into()),
        ] {
            let res = ApiError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn bad_request_maps_to_400() {
        let res = ApiError::BadRequest("nope".into()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
