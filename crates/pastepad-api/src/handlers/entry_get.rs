use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use pastepad_core::models::ClipboardEntry;
use pastepad_core::AppError;
use std::sync::Arc;

/// Fetch one entry (authenticated).
#[utoipa::path(
    get,
    path = "/api/v0/entries/{id}",
    tag = "entries",
    params(("id" = i64, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "The entry", body = ClipboardEntry),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state), fields(operation = "get_entry", entry_id = %id))]
pub async fn get_entry(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClipboardEntry>, HttpAppError> {
    fetch(&state, id).await.map(Json)
}

/// Share-link read of one entry. No authentication; anyone holding the link
/// can view this single entry.
#[utoipa::path(
    get,
    path = "/api/v0/share/{id}",
    tag = "entries",
    params(("id" = i64, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "The shared entry", body = ClipboardEntry),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "share_entry", entry_id = %id))]
pub async fn share_entry(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClipboardEntry>, HttpAppError> {
    fetch(&state, id).await.map(Json)
}

async fn fetch(state: &AppState, id: i64) -> Result<ClipboardEntry, HttpAppError> {
    state
        .entries
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".to_string()).into())
}
