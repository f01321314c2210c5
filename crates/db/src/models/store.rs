//! Store entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fidly_core::types::{DbId, Timestamp};

/// A store row from the `stores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Store {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new store.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStore {
    pub name: String,
}
