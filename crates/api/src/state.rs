use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fidly_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cancelled on shutdown; in-flight sync runs observe a child of
    /// this token and stop iterating cleanly.
    pub shutdown: CancellationToken,
}
