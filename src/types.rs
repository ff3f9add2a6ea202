// Error types shared by the storage layer and the HTTP handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

/// Failure of a `JobStore` operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors surfaced to API clients.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable kind sent as `{ "error": <kind> }`.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => AppError::BadRequest(e.to_string()),
            // Storage failures are reported to clients as a generic bad request
            StoreError::Database(e) => {
                error!(error_type = "database_error", details = %e, "Storage operation failed");
                AppError::BadRequest(e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound => warn!(error_type = self.kind(), "Resource not found"),
            AppError::BadRequest(details) => {
                warn!(error_type = self.kind(), details = %details, "Rejected request")
            }
            AppError::Internal(details) => {
                error!(error_type = self.kind(), details = %details, "Internal failure")
            }
        }

        let body = serde_json::json!({ "error": self.kind() });
        (self.status(), Json(body)).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
