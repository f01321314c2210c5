//! Transaction line-item model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fidly_core::types::{DbId, Timestamp};

/// A line-item row from the `transaction_products` table.
///
/// Append-only: line items are created once alongside their owning
/// transaction and never updated independently.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransactionProduct {
    pub id: DbId,
    pub transaction_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub unit_price: f64,
    pub created_at: Timestamp,
}

/// DTO for creating a new line item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionProduct {
    pub transaction_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub unit_price: f64,
}
