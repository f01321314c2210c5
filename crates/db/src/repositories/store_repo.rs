//! Repository for the `stores` table.

use sqlx::PgPool;

use fidly_core::types::DbId;

use crate::models::store::{CreateStore, Store};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for stores.
pub struct StoreRepo;

impl StoreRepo {
    /// Insert a new store, returning the created row.
    pub async fn create(pool: &PgPool, body: &CreateStore) -> Result<Store, sqlx::Error> {
        let query = format!(
            "INSERT INTO stores (name)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(&body.name)
            .fetch_one(pool)
            .await
    }

    /// Find a single store by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores WHERE id = $1");
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
