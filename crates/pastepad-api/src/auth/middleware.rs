//! Bearer-token gate for the authenticated route group.

use crate::auth::token;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use pastepad_core::AppError;
use std::sync::Arc;

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(bearer) = bearer else {
        return HttpAppError::from(AppError::Unauthorized(
            "Missing bearer token".to_string(),
        ))
        .into_response();
    };

    match token::verify(&state.config.token_secret, bearer) {
        Ok(_claims) => next.run(request).await,
        Err(err) => HttpAppError::from(err).into_response(),
    }
}
