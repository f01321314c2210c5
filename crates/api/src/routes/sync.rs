//! Route definitions for the Square synchronization endpoints.
//!
//! Mounted at `/sync`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sync;
use crate::state::AppState;

/// Routes mounted at `/sync`.
///
/// ```text
/// POST   /square/catalog       -> import_catalog
/// POST   /square/transactions  -> sync_transactions
/// GET    /square/locations     -> list_locations
/// GET    /logs                 -> list_sync_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/square/catalog", post(sync::import_catalog))
        .route("/square/transactions", post(sync::sync_transactions))
        .route("/square/locations", get(sync::list_locations))
        .route("/logs", get(sync::list_sync_logs))
}
