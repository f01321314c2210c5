pub mod health;
pub mod sync;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sync/square/catalog          catalog import (POST)
/// /sync/square/transactions     transaction sync (POST)
/// /sync/square/locations        location listing (GET)
/// /sync/logs                    sync run audit trail (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/sync", sync::router())
}
