//! Admin settings management.

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use pastepad_core::models::SyncPolicy;
use pastepad_core::{AppError, UploadSettings};
use pastepad_storage::LocalUploadStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

/// Settings as exposed to the admin UI; the password is never echoed back.
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub upload: UploadSettings,
    pub sync: SyncPolicy,
}

#[utoipa::path(
    get,
    path = "/api/v0/admin/settings",
    tag = "admin",
    responses(
        (status = 200, description = "Current settings", body = SettingsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<SettingsResponse> {
    let settings = state.settings.get().await;
    Json(SettingsResponse {
        upload: settings.upload,
        sync: settings.sync,
    })
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

#[utoipa::path(
    put,
    path = "/api/v0/admin/password",
    tag = "admin",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 204, description = "Password updated"),
        (status = 400, description = "Empty password", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, request), fields(operation = "update_password"))]
pub async fn update_password(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<UpdatePasswordRequest>,
) -> Result<StatusCode, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let mut settings = state.settings.get().await;
    settings.auth.password = request.password;
    state.settings.save(settings).await?;

    tracing::info!("Admin password updated");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUploadDirsRequest {
    #[validate(length(min = 1, message = "upload directory must not be empty"))]
    pub upload_dir: String,
    #[validate(length(min = 1, message = "editor upload directory must not be empty"))]
    pub editor_upload_dir: String,
}

/// Change the upload directories. Both are created (and thereby validated)
/// before the settings are persisted.
#[utoipa::path(
    put,
    path = "/api/v0/admin/upload-dirs",
    tag = "admin",
    request_body = UpdateUploadDirsRequest,
    responses(
        (status = 204, description = "Directories updated"),
        (status = 400, description = "Empty directory path", body = ErrorResponse),
        (status = 500, description = "Directory cannot be created", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, request), fields(operation = "update_upload_dirs"))]
pub async fn update_upload_dirs(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<UpdateUploadDirsRequest>,
) -> Result<StatusCode, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    for dir in [&request.upload_dir, &request.editor_upload_dir] {
        LocalUploadStore::new(dir)
            .await
            .map_err(|e| AppError::Storage(format!("Cannot create directory {}: {}", dir, e)))?;
    }

    let mut settings = state.settings.get().await;
    settings.upload.upload_dir = request.upload_dir;
    settings.upload.editor_upload_dir = request.editor_upload_dir;
    state.settings.save(settings).await?;

    tracing::info!("Upload directories updated");
    Ok(StatusCode::NO_CONTENT)
}
