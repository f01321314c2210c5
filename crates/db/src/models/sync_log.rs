//! Sync log entity model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fidly_core::types::{DbId, Timestamp};

/// A row from the `integration_sync_logs` table.
///
/// One row is appended at the end of every sync run and never mutated.
/// `integration_id` is nullable so the audit trail survives even when
/// the integration lookup fails at recording time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SyncLog {
    pub id: DbId,
    pub integration_id: Option<DbId>,
    pub sync_type: String,
    pub status: String,
    pub records_synced: i32,
    pub error_details: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending a sync log row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSyncLog {
    pub integration_id: Option<DbId>,
    pub sync_type: String,
    pub status: String,
    pub records_synced: i32,
    pub error_details: Option<String>,
}
