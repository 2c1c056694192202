//! Todo handlers
//!
//! Ids and bodies are taken raw so malformed input is reported by the
//! service as `InvalidInput` rather than by axum's extractors.

use super::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use bytes::Bytes;
use keeper_core::Todo;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.todo_service.list().await?;
    Ok(Json(todos))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.todo_service.get(&id).await?;
    Ok(Json(todo))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<Json<Todo>, ApiError> {
    let todo = state.todo_service.create(&body).await?;
    Ok(Json(todo))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.todo_service.update(&id, &body).await?;
    Ok(Json(todo))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    state.todo_service.delete(&id).await?;
    Ok("deleted.")
}
