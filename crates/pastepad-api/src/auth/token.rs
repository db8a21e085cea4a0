//! Admin session tokens (HS256 JWT).
//!
//! The service has a single admin identity; a token proves a successful
//! password login and carries only an expiry.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use pastepad_core::AppError;
use serde::{Deserialize, Serialize};

const SUBJECT: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue a token; returns (token, lifetime in seconds).
pub fn issue(secret: &str, expiry_hours: i64) -> Result<(String, i64), AppError> {
    let now = Utc::now().timestamp();
    let expires_in = expiry_hours * 3600;
    let claims = Claims {
        sub: SUBJECT.to_string(),
        iat: now,
        exp: now + expires_in,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

    Ok((token, expires_in))
}

pub fn verify(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}
