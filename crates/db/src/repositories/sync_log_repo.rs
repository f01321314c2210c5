//! Repository for the `integration_sync_logs` audit table.

use sqlx::PgPool;

use fidly_core::types::DbId;

use crate::models::sync_log::{CreateSyncLog, SyncLog};

const COLUMNS: &str = "id, integration_id, sync_type, status, records_synced, \
    error_details, created_at";

/// Provides append and query operations for sync logs.
///
/// Sync logs are append-only; there is no update or delete path.
pub struct SyncLogRepo;

impl SyncLogRepo {
    /// Append a sync log row, returning the created row.
    pub async fn create(pool: &PgPool, body: &CreateSyncLog) -> Result<SyncLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO integration_sync_logs
                 (integration_id, sync_type, status, records_synced, error_details)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SyncLog>(&query)
            .bind(body.integration_id)
            .bind(&body.sync_type)
            .bind(&body.status)
            .bind(body.records_synced)
            .bind(&body.error_details)
            .fetch_one(pool)
            .await
    }

    /// List sync logs for a store across all its integrations, newest first.
    pub async fn list_by_store(
        pool: &PgPool,
        store_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SyncLog>, sqlx::Error> {
        let query = format!(
            "SELECT l.{} FROM integration_sync_logs l
             JOIN integrations i ON i.id = l.integration_id
             WHERE i.store_id = $1
             ORDER BY l.created_at DESC
             LIMIT $2 OFFSET $3",
            COLUMNS.replace(", ", ", l.")
        );
        sqlx::query_as::<_, SyncLog>(&query)
            .bind(store_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List sync logs attached to a specific integration, newest first.
    pub async fn list_by_integration(
        pool: &PgPool,
        integration_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SyncLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM integration_sync_logs
             WHERE integration_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, SyncLog>(&query)
            .bind(integration_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
