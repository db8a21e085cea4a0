//! Sync trigger endpoint.
//!
//! Accepts the six policy fields, persists them into settings, then runs the
//! reconciler. Unrecognized policy values are rejected with 400 before any
//! mutation (the `ValidatedJson` extractor surfaces serde's closed-enum
//! errors); a reconciliation failure reports `{success: false, error}`.

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pastepad_core::models::{SyncPolicy, SyncReport};
use pastepad_core::ErrorMetadata;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SyncRunResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: SyncReport,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SyncFailureResponse {
    pub success: bool,
    pub error: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/admin/sync",
    tag = "admin",
    request_body = SyncPolicy,
    responses(
        (status = 200, description = "Reconciliation counters", body = SyncRunResponse),
        (status = 400, description = "Unrecognized policy value", body = ErrorResponse),
        (status = 500, description = "Reconciliation failed", body = SyncFailureResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, policy), fields(operation = "run_sync"))]
pub async fn run_sync(
    State(state): State<Arc<AppState>>,
    ValidatedJson(policy): ValidatedJson<SyncPolicy>,
) -> Result<Response, HttpAppError> {
    // Persist the submitted policy before the passes run.
    let mut settings = state.settings.get().await;
    settings.sync = policy;
    state.settings.save(settings).await?;

    let store = state.upload_store().await?;

    match state.sync.run(&store, &policy).await {
        Ok(report) => Ok(Json(SyncRunResponse {
            success: true,
            report,
        })
        .into_response()),
        Err(e) => {
            tracing::error!(error = %e, "Reconciliation failed");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SyncFailureResponse {
                    success: false,
                    error: e.client_message(),
                }),
            )
                .into_response())
        }
    }
}
