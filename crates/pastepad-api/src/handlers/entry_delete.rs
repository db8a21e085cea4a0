use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use pastepad_core::models::EntryType;
use pastepad_core::AppError;
use pastepad_storage::UploadStore;
use std::sync::Arc;

/// Delete an entry. For file entries the backing file is removed best-effort:
/// a failed removal is logged and the database delete proceeds.
#[utoipa::path(
    delete,
    path = "/api/v0/entries/{id}",
    tag = "entries",
    params(("id" = i64, Path, description = "Entry ID")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state), fields(operation = "delete_entry", entry_id = %id))]
pub async fn delete_entry(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, HttpAppError> {
    let entry = state
        .entries
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;

    if entry.entry_type == EntryType::File {
        if let Some(filename) = entry.filename() {
            let store = state.upload_store().await?;
            if let Err(e) = store.remove(filename).await {
                tracing::warn!(
                    error = %e,
                    entry_id = id,
                    file = %filename,
                    "Failed to remove backing file, deleting entry anyway"
                );
            }
        }
    }

    state.entries.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
