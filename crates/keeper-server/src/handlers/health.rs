//! Health check handler

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use keeper_core::HealthStatus;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let status = state.todo_service.health().await;
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(status))
}
