//! Repository for the `products` table.

use sqlx::PgPool;

use fidly_core::types::DbId;

use crate::models::product::{CreateProduct, Product, UpdateProductFromExternal};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, store_id, name, description, price, external_id, \
    external_source, external_parent_id, is_available, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, body: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (store_id, name, description, price, external_id,
                 external_source, external_parent_id, is_available)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(body.store_id)
            .bind(&body.name)
            .bind(&body.description)
            .bind(body.price)
            .bind(&body.external_id)
            .bind(&body.external_source)
            .bind(&body.external_parent_id)
            .bind(body.is_available)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its external idempotency key.
    pub async fn find_by_external_id(
        pool: &PgPool,
        store_id: DbId,
        external_id: &str,
        external_source: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE store_id = $1 AND external_id = $2 AND external_source = $3"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(store_id)
            .bind(external_id)
            .bind(external_source)
            .fetch_optional(pool)
            .await
    }

    /// Find a product by exact name within a store.
    ///
    /// Name matching is a looser fallback for records never imported
    /// through the catalog path; when several products share the name,
    /// the oldest wins for determinism.
    pub async fn find_by_name(
        pool: &PgPool,
        store_id: DbId,
        name: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE store_id = $1 AND name = $2
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(store_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Refresh a product in place from its external counterpart.
    pub async fn update_from_external(
        pool: &PgPool,
        id: DbId,
        body: &UpdateProductFromExternal,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "UPDATE products
             SET name = $2,
                 description = $3,
                 price = $4,
                 is_available = $5,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&body.name)
            .bind(&body.description)
            .bind(body.price)
            .bind(body.is_available)
            .fetch_one(pool)
            .await
    }

    /// Count products belonging to a store.
    pub async fn count_by_store(pool: &PgPool, store_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE store_id = $1")
            .bind(store_id)
            .fetch_one(pool)
            .await
    }
}
