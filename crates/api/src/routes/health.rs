//! Root-level health endpoint.
//!
//! Mounted outside `/api/v1` so the load balancer and uptime monitor can
//! probe it without auth. The probe pings Postgres on every call; a failed
//! ping degrades the status rather than erroring so the monitor can tell
//! "app down" apart from "app up, database unreachable".

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the database answers, `"degraded"` otherwise.
    pub status: &'static str,
    /// Deployed verdant-api version.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health -- liveness plus a database reachability check.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = verdant_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
