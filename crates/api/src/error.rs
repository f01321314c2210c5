use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use fidly_core::error::CoreError;
use fidly_square::SquareApiError;
use fidly_sync::SyncError;

/// Maximum upstream body length echoed back in an error message.
const MAX_UPSTREAM_BODY: usize = 200;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`SyncError`] for engine
/// failures, and raw sqlx errors from repository calls. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `fidly_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A sync-engine failure that aborted a run.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Sync engine errors ---
            AppError::Sync(sync) => classify_sync_error(sync),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an engine failure into an HTTP status, error code, and message.
///
/// Upstream platform failures map to 502 with a wrapped, truncated
/// summary -- callers never see the raw upstream payload unexplained.
fn classify_sync_error(err: &SyncError) -> (StatusCode, &'static str, String) {
    match err {
        SyncError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        SyncError::Platform(SquareApiError::Api { status, body }) => {
            let summary: String = body.chars().take(MAX_UPSTREAM_BODY).collect();
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                format!("Square API returned HTTP {status}: {summary}"),
            )
        }
        SyncError::Platform(SquareApiError::Request(err)) => {
            tracing::error!(error = %err, "Square request failed");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Could not reach the Square API".to_string(),
            )
        }
        SyncError::Database(err) => classify_sqlx_error(err),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
