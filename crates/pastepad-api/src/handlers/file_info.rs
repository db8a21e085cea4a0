use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::file_download::resolve_file;
use crate::state::AppState;
use crate::utils::mime::content_type_for;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use pastepad_storage::UploadStore;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct FileInfoResponse {
    pub name: String,
    pub size: u64,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub content_type: String,
}

/// Filesystem metadata of a file entry's backing file.
#[utoipa::path(
    get,
    path = "/api/v0/files/{id}/info",
    tag = "files",
    params(("id" = i64, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "File metadata", body = FileInfoResponse),
        (status = 404, description = "Entry or file not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "file_info", entry_id = %id))]
pub async fn file_info(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<FileInfoResponse>, HttpAppError> {
    let (filename, store) = resolve_file(&state, id).await?;
    let stat = store.stat(&filename).await.map_err(HttpAppError::from)?;

    Ok(Json(FileInfoResponse {
        content_type: content_type_for(&filename).to_string(),
        name: filename,
        size: stat.len,
        created: stat.created_at,
        modified: stat.modified_at,
    }))
}
