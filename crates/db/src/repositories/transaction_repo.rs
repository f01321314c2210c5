//! Repository for the `transactions` table.

use sqlx::PgPool;

use fidly_core::types::DbId;

use crate::models::transaction::{CreateTransaction, Transaction};

const COLUMNS: &str = "id, store_id, occurred_at, total_amount, payment_method, \
    transaction_type, customer_id, external_id, external_source, created_at";

/// Provides insert and lookup operations for transactions.
///
/// Transactions are append-only, so there is deliberately no update
/// method here.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Insert a new transaction, returning the created row.
    ///
    /// The partial unique index on
    /// `(store_id, external_id, external_source)` rejects a second
    /// insert for the same external payment.
    pub async fn create(
        pool: &PgPool,
        body: &CreateTransaction,
    ) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO transactions (store_id, occurred_at, total_amount,
                 payment_method, transaction_type, customer_id, external_id, external_source)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(body.store_id)
            .bind(body.occurred_at)
            .bind(body.total_amount)
            .bind(&body.payment_method)
            .bind(body.transaction_type)
            .bind(body.customer_id)
            .bind(&body.external_id)
            .bind(&body.external_source)
            .fetch_one(pool)
            .await
    }

    /// Find a transaction by its external idempotency key.
    pub async fn find_by_external_id(
        pool: &PgPool,
        store_id: DbId,
        external_id: &str,
        external_source: &str,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions
             WHERE store_id = $1 AND external_id = $2 AND external_source = $3"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(store_id)
            .bind(external_id)
            .bind(external_source)
            .fetch_optional(pool)
            .await
    }

    /// Count transactions belonging to a store.
    pub async fn count_by_store(pool: &PgPool, store_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE store_id = $1")
            .bind(store_id)
            .fetch_one(pool)
            .await
    }
}
