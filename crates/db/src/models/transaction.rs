//! Transaction entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fidly_core::types::{DbId, Timestamp};

/// A transaction row from the `transactions` table.
///
/// Transactions are append-only: once created there is no update path.
/// Imported transactions carry the `(external_id, external_source)`
/// pair; the partial unique index on
/// `(store_id, external_id, external_source)` guarantees at most one
/// row per external payment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub store_id: DbId,
    pub occurred_at: Timestamp,
    pub total_amount: f64,
    pub payment_method: String,
    pub transaction_type: i16,
    pub customer_id: Option<DbId>,
    pub external_id: Option<String>,
    pub external_source: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransaction {
    pub store_id: DbId,
    pub occurred_at: Timestamp,
    pub total_amount: f64,
    pub payment_method: String,
    pub transaction_type: i16,
    pub customer_id: Option<DbId>,
    pub external_id: Option<String>,
    pub external_source: Option<String>,
}
