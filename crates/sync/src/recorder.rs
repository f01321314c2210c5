//! Best-effort sync log recording.

use sqlx::PgPool;

use fidly_core::sync::{join_errors, SyncStatus, PROVIDER_SQUARE};
use fidly_core::types::DbId;
use fidly_db::models::sync_log::CreateSyncLog;
use fidly_db::repositories::{IntegrationRepo, SyncLogRepo};

/// Append one audit row for a completed (or aborted) sync run.
///
/// The integration is resolved for `(store_id, "square")` immediately
/// before writing; if that lookup fails or no row exists, the log is
/// written with a null integration reference. Log writing is
/// best-effort: failures are logged at warn level and never escalate
/// into the run result.
pub async fn record_sync(
    pool: &PgPool,
    store_id: DbId,
    sync_type: &str,
    status: SyncStatus,
    records_synced: u32,
    errors: &[String],
) {
    let integration_id =
        match IntegrationRepo::find_by_store_and_provider(pool, store_id, PROVIDER_SQUARE).await {
            Ok(integration) => integration.map(|i| i.id),
            Err(err) => {
                tracing::warn!(store_id, error = %err, "Integration lookup failed, logging without reference");
                None
            }
        };

    let body = CreateSyncLog {
        integration_id,
        sync_type: sync_type.to_string(),
        status: status.as_str().to_string(),
        records_synced: records_synced as i32,
        error_details: join_errors(errors),
    };

    if let Err(err) = SyncLogRepo::create(pool, &body).await {
        tracing::warn!(store_id, sync_type, error = %err, "Failed to write sync log");
    }
}
