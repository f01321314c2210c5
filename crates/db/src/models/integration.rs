//! Integration entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fidly_core::types::{DbId, Timestamp};

/// An integration row from the `integrations` table.
///
/// One row per `(store_id, provider)` pair, holding the stored
/// credential plus run bookkeeping (`sync_count`, `last_sync_at`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Integration {
    pub id: DbId,
    pub store_id: DbId,
    pub provider: String,
    /// Never serialized into API responses.
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub sync_count: i32,
    pub last_sync_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new integration.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIntegration {
    pub store_id: DbId,
    pub provider: String,
    pub access_token: Option<String>,
}
