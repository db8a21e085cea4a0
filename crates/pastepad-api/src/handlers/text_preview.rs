use crate::constants::TEXT_PREVIEW_MAX_BYTES;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::file_download::resolve_file;
use crate::state::AppState;
use crate::utils::mime::{content_type_for, is_text_content_type};
use axum::{
    extract::{Path, State},
    Json,
};
use pastepad_core::AppError;
use pastepad_storage::UploadStore;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct TextPreviewResponse {
    pub content: String,
    pub content_type: String,
}

/// Inline text content of a text-like file entry. Only extension-detected
/// text types are previewable, capped at 10 MB.
#[utoipa::path(
    get,
    path = "/api/v0/files/{id}/preview",
    tag = "files",
    params(("id" = i64, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "File text", body = TextPreviewResponse),
        (status = 400, description = "Not a text file or too large", body = ErrorResponse),
        (status = 404, description = "Entry or file not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "text_preview", entry_id = %id))]
pub async fn text_preview(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<TextPreviewResponse>, HttpAppError> {
    let (filename, store) = resolve_file(&state, id).await?;

    let content_type = content_type_for(&filename);
    if !is_text_content_type(content_type) {
        return Err(AppError::BadRequest("Not a text file".to_string()).into());
    }

    let stat = store.stat(&filename).await.map_err(HttpAppError::from)?;
    if stat.len > TEXT_PREVIEW_MAX_BYTES {
        return Err(AppError::BadRequest("File too large to preview".to_string()).into());
    }

    let content = store
        .read_text(&filename)
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(TextPreviewResponse {
        content,
        content_type: content_type.to_string(),
    }))
}
