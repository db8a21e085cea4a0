//! Editor media uploads (images/audio embedded in markdown entries).
//!
//! These live in a separate directory from share files, under generated
//! names, and are served inline rather than as attachments.

use crate::constants::API_PREFIX;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::mime::content_type_for;
use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use pastepad_core::AppError;
use pastepad_storage::UploadStore;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct EditorUploadResponse {
    /// Serving URL for embedding in markdown.
    pub url: String,
    /// Name the file was stored under.
    pub filename: String,
    /// Original client filename.
    pub original_filename: String,
}

/// Upload one image/audio file for the editor. Content types outside the
/// configured allowlist are rejected.
#[utoipa::path(
    post,
    path = "/api/v0/editor-uploads",
    tag = "files",
    responses(
        (status = 201, description = "Stored", body = EditorUploadResponse),
        (status = 400, description = "Missing file or disallowed content type", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_editor_file"))]
pub async fn upload_editor_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<EditorUploadResponse>), HttpAppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(|ct| ct.to_lowercase())
            .ok_or_else(|| AppError::InvalidInput("Missing content type".to_string()))?;
        if !state
            .config
            .editor_allowed_content_types
            .contains(&content_type)
        {
            return Err(AppError::InvalidInput(format!(
                "Content type '{}' is not allowed, only images and audio",
                content_type
            ))
            .into());
        }

        let original = field.file_name().unwrap_or("file").to_string();
        let stored_name = generated_name(&original);

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::PayloadTooLarge(format!("Failed to read upload: {}", e)))?;

        let store = state.editor_store().await?;
        let stored_name = store.save(&stored_name, &data).await?;

        return Ok((
            StatusCode::CREATED,
            Json(EditorUploadResponse {
                url: format!("{}/editor-uploads/{}", API_PREFIX, stored_name),
                filename: stored_name,
                original_filename: original,
            }),
        ));
    }

    Err(AppError::BadRequest("Missing file field".to_string()).into())
}

/// Serve an editor upload inline.
#[utoipa::path(
    get,
    path = "/api/v0/editor-uploads/{filename}",
    tag = "files",
    params(("filename" = String, Path, description = "Stored filename")),
    responses(
        (status = 200, description = "The file"),
        (status = 404, description = "No such file", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "serve_editor_file", file = %filename))]
pub async fn serve_editor_file(
    Path(filename): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpAppError> {
    let store = state.editor_store().await?;
    let stat = store.stat(&filename).await.map_err(HttpAppError::from)?;
    let file = store.open(&filename).await.map_err(HttpAppError::from)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&filename))
        .header(header::CONTENT_LENGTH, stat.len)
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)).into())
}

/// Random name preserving the original extension.
fn generated_name(original: &str) -> String {
    match original.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{}.{}", Uuid::new_v4(), ext),
        _ => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_name_keeps_extension() {
        let name = generated_name("photo.PNG");
        assert!(name.ends_with(".PNG"));
        assert!(name.len() > 10);

        let bare = generated_name("noext");
        assert!(!bare.contains('.'));
    }
}
