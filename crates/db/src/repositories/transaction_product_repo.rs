//! Repository for the `transaction_products` line-item table.

use sqlx::PgPool;

use fidly_core::types::DbId;

use crate::models::transaction_product::{CreateTransactionProduct, TransactionProduct};

const COLUMNS: &str = "id, transaction_id, product_id, quantity, unit_price, created_at";

/// Provides insert and lookup operations for transaction line items.
pub struct TransactionProductRepo;

impl TransactionProductRepo {
    /// Insert a new line item, returning the created row.
    pub async fn create(
        pool: &PgPool,
        body: &CreateTransactionProduct,
    ) -> Result<TransactionProduct, sqlx::Error> {
        let query = format!(
            "INSERT INTO transaction_products (transaction_id, product_id, quantity, unit_price)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TransactionProduct>(&query)
            .bind(body.transaction_id)
            .bind(body.product_id)
            .bind(body.quantity)
            .bind(body.unit_price)
            .fetch_one(pool)
            .await
    }

    /// List line items for a transaction, in insertion order.
    pub async fn list_by_transaction(
        pool: &PgPool,
        transaction_id: DbId,
    ) -> Result<Vec<TransactionProduct>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transaction_products
             WHERE transaction_id = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, TransactionProduct>(&query)
            .bind(transaction_id)
            .fetch_all(pool)
            .await
    }
}
