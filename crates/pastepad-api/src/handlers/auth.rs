//! Admin login.

use crate::auth::token;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::utils::client_ip::client_ip;
use axum::{extract::State, http::HeaderMap, Json};
use pastepad_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Exchange the admin password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v0/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 429, description = "Too many failed attempts", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers, request), fields(operation = "login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let ip = client_ip(&headers);
    if state.login_limiter.is_blocked(&ip).await {
        return Err(AppError::RateLimited(
            "Too many failed login attempts, try again later".to_string(),
        )
        .into());
    }

    let expected = state.settings.get().await.auth.password;
    let matches: bool = request
        .password
        .as_bytes()
        .ct_eq(expected.as_bytes())
        .into();

    if !matches {
        let now_blocked = state.login_limiter.record_failure(&ip).await;
        tracing::warn!(client = %ip, now_blocked, "Failed login attempt");
        return Err(AppError::Unauthorized("Wrong password".to_string()).into());
    }

    let (token, expires_in) = token::issue(
        &state.config.token_secret,
        state.config.token_expiry_hours,
    )?;

    Ok(Json(LoginResponse { token, expires_in }))
}
