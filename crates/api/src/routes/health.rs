//! Liveness of the two collaborators every page depends on: the database
//! and the blob storage directory.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when a collaborator is unavailable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the upload directory exists and is a directory.
    pub storage_healthy: bool,
}

impl HealthResponse {
    fn new(db_healthy: bool, storage_healthy: bool) -> Self {
        Self {
            status: if db_healthy && storage_healthy {
                "ok"
            } else {
                "degraded"
            },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            storage_healthy,
        }
    }
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = plantpal_db::health_check(&state.pool).await.is_ok();
    let storage_healthy = tokio::fs::metadata(state.blobs.root())
        .await
        .is_ok_and(|m| m.is_dir());

    if !(db_healthy && storage_healthy) {
        tracing::warn!(db_healthy, storage_healthy, "Health check degraded");
    }
    Json(HealthResponse::new(db_healthy, storage_healthy))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
