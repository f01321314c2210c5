//! Handlers for the Square synchronization endpoints.
//!
//! Two operations drive the engine -- catalog import and transaction
//! sync -- plus helpers for picking a location and auditing past runs.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use fidly_core::error::CoreError;
use fidly_core::paging::{clamp_limit, clamp_offset, DEFAULT_LOG_LIMIT, MAX_LOG_LIMIT};
use fidly_core::sync::SyncStatus;
use fidly_core::types::DbId;
use fidly_db::models::store::Store;
use fidly_db::repositories::{StoreRepo, SyncLogRepo};
use fidly_square::{Platform, SquareApi};
use fidly_sync::DateRange;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies and query parameters
// ---------------------------------------------------------------------------

/// Request body for a catalog import run.
#[derive(Debug, Deserialize)]
pub struct ImportCatalogRequest {
    pub store_id: DbId,
    pub access_token: String,
}

/// Request body for a transaction sync run.
#[derive(Debug, Deserialize)]
pub struct SyncTransactionsRequest {
    pub store_id: DbId,
    pub access_token: String,
    pub location_id: String,
    /// RFC 3339 lower bound of the payment window.
    pub begin_time: String,
    /// RFC 3339 upper bound of the payment window.
    pub end_time: String,
}

/// Query parameters for listing Square locations.
#[derive(Debug, Deserialize)]
pub struct ListLocationsParams {
    pub access_token: String,
}

/// Query parameters for listing sync logs.
#[derive(Debug, Deserialize)]
pub struct ListLogsParams {
    pub store_id: DbId,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Result payload for a catalog import run.
#[derive(Debug, Serialize)]
pub struct CatalogImportResponse {
    pub status: SyncStatus,
    pub imported: u32,
    pub updated: u32,
    pub errors: Vec<String>,
}

/// Result payload for a transaction sync run.
#[derive(Debug, Serialize)]
pub struct TransactionSyncResponse {
    pub status: SyncStatus,
    pub synced: u32,
    pub errors: Vec<String>,
}

/// A Square location, reduced to what the location picker needs.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub id: String,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject an empty or whitespace-only required field.
fn require_field(value: &str, name: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{name} is required"
        ))));
    }
    Ok(())
}

/// Verify that a store exists, returning the full row.
async fn ensure_store_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Store> {
    if id <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "store_id is required".to_string(),
        )));
    }
    StoreRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Store", id }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /sync/square/catalog
///
/// Import the Square catalog into the store's products. Per-product
/// failures are reported in `errors` with an overall `partial` status;
/// they do not fail the request.
pub async fn import_catalog(
    State(state): State<AppState>,
    Json(input): Json<ImportCatalogRequest>,
) -> AppResult<impl IntoResponse> {
    require_field(&input.access_token, "access_token")?;
    let store = ensure_store_exists(&state.pool, input.store_id).await?;

    let platform = SquareApi::from_access_token(&input.access_token);
    let cancel = state.shutdown.child_token();

    let report = fidly_sync::import_catalog(&state.pool, &platform, store.id, &cancel).await?;

    tracing::info!(
        store_id = store.id,
        imported = report.imported,
        updated = report.updated,
        "Catalog import requested via API"
    );

    Ok(Json(DataResponse {
        data: CatalogImportResponse {
            status: SyncStatus::from_error_count(report.errors.len()),
            imported: report.imported,
            updated: report.updated,
            errors: report.errors,
        },
    }))
}

/// POST /sync/square/transactions
///
/// Import completed Square payments for a location and date range as
/// transactions with line items.
pub async fn sync_transactions(
    State(state): State<AppState>,
    Json(input): Json<SyncTransactionsRequest>,
) -> AppResult<impl IntoResponse> {
    require_field(&input.access_token, "access_token")?;
    require_field(&input.location_id, "location_id")?;
    require_field(&input.begin_time, "begin_time")?;
    require_field(&input.end_time, "end_time")?;
    let store = ensure_store_exists(&state.pool, input.store_id).await?;

    let platform = SquareApi::from_access_token(&input.access_token);
    let cancel = state.shutdown.child_token();
    let range = DateRange {
        begin_time: input.begin_time,
        end_time: input.end_time,
    };

    let report = fidly_sync::sync_transactions(
        &state.pool,
        &platform,
        store.id,
        &input.location_id,
        &range,
        &cancel,
    )
    .await?;

    tracing::info!(
        store_id = store.id,
        synced = report.synced,
        "Transaction sync requested via API"
    );

    Ok(Json(DataResponse {
        data: TransactionSyncResponse {
            status: SyncStatus::from_error_count(report.errors.len()),
            synced: report.synced,
            errors: report.errors,
        },
    }))
}

/// GET /sync/square/locations?access_token=
///
/// List the seller's locations so a location can be picked before the
/// first transaction sync.
pub async fn list_locations(
    Query(params): Query<ListLocationsParams>,
) -> AppResult<impl IntoResponse> {
    require_field(&params.access_token, "access_token")?;

    let platform = SquareApi::from_access_token(&params.access_token);
    let locations = platform
        .list_locations()
        .await
        .map_err(fidly_sync::SyncError::Platform)?;

    let data: Vec<LocationResponse> = locations
        .into_iter()
        .map(|l| LocationResponse {
            id: l.id,
            name: l.name,
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /sync/logs?store_id=&limit=&offset=
///
/// List recent sync runs for a store, newest first.
pub async fn list_sync_logs(
    State(state): State<AppState>,
    Query(params): Query<ListLogsParams>,
) -> AppResult<impl IntoResponse> {
    let store = ensure_store_exists(&state.pool, params.store_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_LOG_LIMIT, MAX_LOG_LIMIT);
    let offset = clamp_offset(params.offset);

    let logs = SyncLogRepo::list_by_store(&state.pool, store.id, limit, offset).await?;

    Ok(Json(DataResponse { data: logs }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_required_field_rejected() {
        assert!(require_field("", "access_token").is_err());
        assert!(require_field("   ", "access_token").is_err());
    }

    #[test]
    fn present_field_accepted() {
        assert!(require_field("EAAAEtoken", "access_token").is_ok());
    }
}
