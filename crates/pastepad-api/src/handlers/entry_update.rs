use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use pastepad_core::models::ClipboardEntry;
use pastepad_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEntryRequest {
    #[validate(length(min = 1, max = 500, message = "title must be 1-500 characters"))]
    pub title: String,
    pub content: Option<String>,
}

/// Update title/content of an entry. `entry_type` and `file_path` are
/// immutable after creation.
#[utoipa::path(
    put,
    path = "/api/v0/entries/{id}",
    tag = "entries",
    params(("id" = i64, Path, description = "Entry ID")),
    request_body = UpdateEntryRequest,
    responses(
        (status = 200, description = "Updated entry", body = ClipboardEntry),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, request), fields(operation = "update_entry", entry_id = %id))]
pub async fn update_entry(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<UpdateEntryRequest>,
) -> Result<Json<ClipboardEntry>, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let found = state
        .entries
        .update(id, &request.title, request.content.as_deref())
        .await?;
    if !found {
        return Err(AppError::NotFound("Entry not found".to_string()).into());
    }

    let entry = state
        .entries
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;

    Ok(Json(entry))
}
