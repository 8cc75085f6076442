use crate::state::AppState;
use axum::extract::State;
use axum::response::Json;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub uptime: u64,
}

/// `GET /health`. No dependency checks beyond process liveness — there is no
/// database or cache backend in this workspace to probe.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        uptime: state.uptime_seconds(),
    })
}
