use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, Json};
use pastepad_core::models::ClipboardEntry;
use std::sync::Arc;

/// All entries, newest first.
#[utoipa::path(
    get,
    path = "/api/v0/entries",
    tag = "entries",
    responses(
        (status = 200, description = "Entries, newest first", body = [ClipboardEntry]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state), fields(operation = "list_entries"))]
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ClipboardEntry>>, HttpAppError> {
    let entries = state.entries.list().await?;
    Ok(Json(entries))
}
