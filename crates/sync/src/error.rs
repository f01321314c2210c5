//! Engine error taxonomy.
//!
//! Only failures that abort a whole run become a [`SyncError`]:
//! missing input, a failed listing call, or a database failure outside
//! the per-record loop. Individual record failures are accumulated into
//! the run report instead, and a failed order batch-retrieve degrades
//! to an empty order set rather than erroring at all.

use fidly_square::SquareApiError;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A required input (credential, store id, location id) is missing.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A listing call against the external platform failed.
    #[error("Platform request failed: {0}")]
    Platform(#[from] SquareApiError),

    /// A database failure outside the per-record loop.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
