use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vitalwatch_core::error::CoreError;
use vitalwatch_db::StoreError;

use crate::ingest::IngestError;

/// Application-level error type for HTTP handlers.
///
/// Wraps domain errors and implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vitalwatch_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure inside the ingestion pipeline.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A store error on a read path. Write-path store failures never
    /// reach this type; the pipeline contains them.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),

            AppError::Ingest(IngestError::Validation(core)) => classify_core_error(core),
            AppError::Ingest(IngestError::Prediction(err)) => {
                tracing::error!(error = %err, "Prediction service failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "PREDICTION_FAILED",
                    "Blood-pressure prediction is unavailable".to_string(),
                )
            }

            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a [`CoreError`] to an HTTP status, error code, and message.
fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
