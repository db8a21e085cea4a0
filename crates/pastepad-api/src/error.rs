//! HTTP error response conversion
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`.
//! Use `AppError` (or types that implement `Into<AppError>`) for errors and
//! `.map_err(Into::into)` so they become `HttpAppError` and render
//! consistently (status, body, logging).

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pastepad_core::{AppError, ErrorMetadata, LogLevel};
use pastepad_storage::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from pastepad-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on
/// deserialization failure, including unrecognized policy values.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let is_production = is_production_env();

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Always hide details in production for security; in non-production, only show details for non-sensitive errors.
        let body = if is_production || app_error.is_sensitive() {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
            })
        } else {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
            })
        };

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(name) => AppError::NotFound(format!("File not found: {}", name)),
            StorageError::InvalidName(name) => {
                AppError::InvalidInput(format!("Invalid file name: {}", name))
            }
            StorageError::Io(err) => AppError::Internal(format!("IO error: {}", err)),
        };
        HttpAppError(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_not_found() {
        let storage_err = StorageError::NotFound("scan.png".to_string());
        let HttpAppError(app_err) = storage_err.into();
        match app_err {
            AppError::NotFound(msg) => assert!(msg.contains("scan.png")),
            _ => panic!("Expected NotFound variant"),
        }
    }

    #[test]
    fn test_from_storage_error_invalid_name() {
        let storage_err = StorageError::InvalidName("../escape".to_string());
        let HttpAppError(app_err) = storage_err.into();
        match app_err {
            AppError::InvalidInput(msg) => assert!(msg.contains("../escape")),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_from_storage_error_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let HttpAppError(app_err) = StorageError::Io(io_err).into();
        match app_err {
            AppError::Internal(msg) => assert!(msg.contains("denied")),
            _ => panic!("Expected Internal variant"),
        }
    }

    /// Verifies the public error response contract: serialized ErrorResponse has
    /// "error", "code", "recoverable", and optionally "details" / "error_type" /
    /// "suggested_action".
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Not found".to_string(),
            details: Some("Entry not found".to_string()),
            error_type: Some("NotFound".to_string()),
            code: "NOT_FOUND".to_string(),
            recoverable: false,
            suggested_action: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("error").and_then(|v| v.as_str()).is_some());
        assert!(json.get("code").and_then(|v| v.as_str()).is_some());
        assert!(json.get("recoverable").and_then(|v| v.as_bool()).is_some());
        assert_eq!(json.get("code").and_then(|v| v.as_str()), Some("NOT_FOUND"));
    }
}
