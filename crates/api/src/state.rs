use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::BlobStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: plantpal_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Photo and avatar storage.
    pub blobs: Arc<BlobStore>,
}
