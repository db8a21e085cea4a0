//! Multipart upload creating a file entry.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use pastepad_core::models::{ClipboardEntry, NewEntry};
use pastepad_core::AppError;
use pastepad_storage::UploadStore;
use std::path::Path;
use std::sync::Arc;

/// Upload a file and create the referencing entry.
///
/// Fields: `file` (required), `title` (optional, defaults to the original
/// filename). Name collisions in the upload directory are resolved as
/// `name (N).ext`; the entry's `file_path` records the name actually stored.
#[utoipa::path(
    post,
    path = "/api/v0/entries/file",
    tag = "entries",
    responses(
        (status = 201, description = "File entry created", body = ClipboardEntry),
        (status = 400, description = "Missing file field", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ClipboardEntry>), HttpAppError> {
    let mut title: Option<String> = None;
    let mut stored: Option<(String, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("title") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid title field: {}", e)))?;
                if !value.trim().is_empty() {
                    title = Some(value);
                }
            }
            Some("file") => {
                let original = sanitize_filename(field.file_name());
                let data = field.bytes().await.map_err(|e| {
                    AppError::PayloadTooLarge(format!("Failed to read upload: {}", e))
                })?;

                let store = state.upload_store().await?;
                let stored_name = store.save(&original, &data).await?;
                stored = Some((stored_name, original));
            }
            _ => {}
        }
    }

    let (stored_name, original) =
        stored.ok_or_else(|| AppError::BadRequest("Missing file field".to_string()))?;

    let entry = state
        .entries
        .create(NewEntry::file(
            title.unwrap_or_else(|| original.clone()),
            format!("uploads/{}", stored_name),
        ))
        .await?;

    tracing::info!(
        entry_id = entry.id,
        stored = %stored_name,
        original = %original,
        "Created file entry from upload"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Keep only the final path component of a client-supplied filename.
fn sanitize_filename(name: Option<&str>) -> String {
    name.and_then(|n| Path::new(n).file_name())
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("upload.bin")
        .to_string()
}
