//! Repository for the `integrations` table.

use sqlx::PgPool;

use fidly_core::types::DbId;

use crate::models::integration::{CreateIntegration, Integration};

const COLUMNS: &str = "id, store_id, provider, access_token, sync_count, \
    last_sync_at, created_at, updated_at";

/// Provides CRUD and bookkeeping operations for integrations.
pub struct IntegrationRepo;

impl IntegrationRepo {
    /// Insert a new integration, returning the created row.
    pub async fn create(
        pool: &PgPool,
        body: &CreateIntegration,
    ) -> Result<Integration, sqlx::Error> {
        let query = format!(
            "INSERT INTO integrations (store_id, provider, access_token)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Integration>(&query)
            .bind(body.store_id)
            .bind(&body.provider)
            .bind(&body.access_token)
            .fetch_one(pool)
            .await
    }

    /// Find the integration for a store and provider pair.
    pub async fn find_by_store_and_provider(
        pool: &PgPool,
        store_id: DbId,
        provider: &str,
    ) -> Result<Option<Integration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM integrations
             WHERE store_id = $1 AND provider = $2"
        );
        sqlx::query_as::<_, Integration>(&query)
            .bind(store_id)
            .bind(provider)
            .fetch_optional(pool)
            .await
    }

    /// Increment the run counter and stamp the last-sync time.
    pub async fn record_sync_run(pool: &PgPool, id: DbId) -> Result<Integration, sqlx::Error> {
        let query = format!(
            "UPDATE integrations
             SET sync_count = sync_count + 1,
                 last_sync_at = NOW(),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Integration>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
