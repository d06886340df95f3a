//! Liveness probe.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// `GET /health`: the process is up; reports whether the database answers.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if state.db.health_check().await {
        "up"
    } else {
        warn!("Health check: database unreachable");
        "down"
    };

    Json(HealthResponse {
        status: "ok",
        database,
    })
}
