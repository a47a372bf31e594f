use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the database answers, `"degraded"` otherwise.
    pub status: &'static str,
    /// Version baked in at compile time.
    pub version: &'static str,
    /// Result of the connectivity probe.
    pub db_healthy: bool,
}

/// Liveness and database probe. Always answers 200; a broken database
/// shows up in the body, not the status code.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = encuentro_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mounted at the root, outside the versioned `/api/v1` tree.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
