//! File entry download with resumable-range support.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::range::parse_range;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use pastepad_core::models::{ClipboardEntry, EntryType};
use pastepad_core::AppError;
use pastepad_storage::UploadStore;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::io::SeekFrom;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

/// Download the backing file of a file entry. Public: this is the share-link
/// download path. Supports single `Range: bytes=` requests (206/416).
#[utoipa::path(
    get,
    path = "/api/v0/files/{id}/download",
    tag = "files",
    params(("id" = i64, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Whole file"),
        (status = 206, description = "Requested byte range"),
        (status = 404, description = "Entry or file not found", body = ErrorResponse),
        (status = 416, description = "Range outside the file", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers), fields(operation = "download_file", entry_id = %id))]
pub async fn download_file(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, HttpAppError> {
    let (filename, store) = resolve_file(&state, id).await?;
    let stat = store.stat(&filename).await.map_err(HttpAppError::from)?;
    let mut file = store.open(&filename).await.map_err(HttpAppError::from)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        utf8_percent_encode(&filename, NON_ALPHANUMERIC)
    );

    let range_header = headers
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok());

    let range = parse_range(range_header, stat.len).map_err(|_| {
        AppError::RangeNotSatisfiable(format!(
            "Requested range is outside the file ({} bytes)",
            stat.len
        ))
    })?;

    let response = match range {
        Some((start, end)) => {
            file.seek(SeekFrom::Start(start))
                .await
                .map_err(|e| AppError::Internal(format!("Seek failed: {}", e)))?;
            let chunk_size = end - start + 1;
            let stream = ReaderStream::new(file.take(chunk_size));

            Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, "application/octet-stream")
                .header(header::CONTENT_DISPOSITION, disposition)
                .header(header::ACCEPT_RANGES, "bytes")
                .header(header::CONTENT_LENGTH, chunk_size)
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, end, stat.len),
                )
                .body(Body::from_stream(stream))
        }
        None => {
            let stream = ReaderStream::new(file);
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, "application/octet-stream")
                .header(header::CONTENT_DISPOSITION, disposition)
                .header(header::ACCEPT_RANGES, "bytes")
                .header(header::CONTENT_LENGTH, stat.len)
                .body(Body::from_stream(stream))
        }
    };

    response.map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)).into())
}

/// Resolve a file entry to its on-disk filename and the current upload store.
/// 404 for unknown ids, non-file entries, and dangling references.
pub(super) async fn resolve_file(
    state: &AppState,
    id: i64,
) -> Result<(String, pastepad_storage::LocalUploadStore), HttpAppError> {
    let entry: ClipboardEntry = state
        .entries
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;

    if entry.entry_type != EntryType::File {
        return Err(AppError::NotFound("Entry has no file".to_string()).into());
    }
    let filename = entry
        .filename()
        .ok_or_else(|| AppError::NotFound("Entry has no file".to_string()))?
        .to_string();

    let store = state.upload_store().await?;
    Ok((filename, store))
}
