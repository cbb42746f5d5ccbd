//! Basic handlers - health check.

use axum::{Json, extract::State};
use serde::Serialize;

use super::ServerState;

const SERVICE_NAME: &str = "lumigate";

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: &'static str,
    pub uptime: u64,
}

/// Liveness check with uptime. Does not touch the vendor API.
pub async fn health_handler(State(state): State<ServerState>) -> Json<HealthStatus> {
    let uptime = chrono::Utc::now().timestamp() - state.started_at;

    Json(HealthStatus {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION"),
        uptime: uptime.max(0) as u64,
    })
}
