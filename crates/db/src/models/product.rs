//! Product entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fidly_core::types::{DbId, Timestamp};

/// A product row from the `products` table.
///
/// Products imported from an external catalog carry an
/// `(external_id, external_source)` pair; the partial unique index on
/// `(store_id, external_id, external_source)` makes that pair the
/// idempotency key for catalog upserts. Variant products additionally
/// record the owning catalog item in `external_parent_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub store_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub external_id: Option<String>,
    pub external_source: Option<String>,
    pub external_parent_id: Option<String>,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub store_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub external_id: Option<String>,
    pub external_source: Option<String>,
    pub external_parent_id: Option<String>,
    pub is_available: bool,
}

/// DTO for refreshing a product from its external catalog counterpart.
///
/// Only the fields the external platform owns are writable here; local
/// fields (store ownership, external linkage) never change on re-sync.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductFromExternal {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub is_available: bool,
}
