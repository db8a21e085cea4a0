//! Health probes.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

/// Liveness probe - process is running.
pub async fn liveness(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - verifies the database answers.
pub async fn readiness(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = match state.entries.list_file_entries().await {
        Ok(_) => "healthy".to_string(),
        Err(e) => format!("database: {}", e),
    };

    let healthy = database == "healthy";
    let status = if healthy { "ready" } else { "degraded" };

    (
        if healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        },
        Json(serde_json::json!({ "status": status, "database": database })),
    )
}
