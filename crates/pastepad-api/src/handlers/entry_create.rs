//! Creation of inline entries (text, markdown, link).
//!
//! File entries are created by the multipart upload handler in
//! `file_upload.rs` / the sync reconciler.

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use pastepad_core::models::{ClipboardEntry, EntryType, NewEntry};
use pastepad_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInlineEntryRequest {
    #[validate(length(min = 1, max = 500, message = "title must be 1-500 characters"))]
    pub title: String,
    pub content: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/entries/text",
    tag = "entries",
    request_body = CreateInlineEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = ClipboardEntry),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn create_text(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateInlineEntryRequest>,
) -> Result<(StatusCode, Json<ClipboardEntry>), HttpAppError> {
    create_inline(&state, EntryType::Text, request).await
}

#[utoipa::path(
    post,
    path = "/api/v0/entries/markdown",
    tag = "entries",
    request_body = CreateInlineEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = ClipboardEntry),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn create_markdown(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateInlineEntryRequest>,
) -> Result<(StatusCode, Json<ClipboardEntry>), HttpAppError> {
    create_inline(&state, EntryType::Markdown, request).await
}

#[utoipa::path(
    post,
    path = "/api/v0/entries/link",
    tag = "entries",
    request_body = CreateInlineEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = ClipboardEntry),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn create_link(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateInlineEntryRequest>,
) -> Result<(StatusCode, Json<ClipboardEntry>), HttpAppError> {
    create_inline(&state, EntryType::Link, request).await
}

#[tracing::instrument(skip(state, request), fields(operation = "create_entry", entry_type = %entry_type))]
async fn create_inline(
    state: &AppState,
    entry_type: EntryType,
    request: CreateInlineEntryRequest,
) -> Result<(StatusCode, Json<ClipboardEntry>), HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let entry = state
        .entries
        .create(NewEntry {
            entry_type,
            title: request.title,
            content: Some(request.content),
            file_path: None,
            created_at: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}
