use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use mowwatch_pipeline::PollerSnapshot;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` while the most recent poll tick failed.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub poller: PollerSnapshot,
}

/// GET /health -- returns service and poller health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let poller = state.poller.snapshot().await;

    let status = if poller.is_healthy() { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        poller,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
