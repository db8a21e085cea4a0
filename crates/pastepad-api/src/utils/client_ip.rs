//! Best-effort client address for the login failure limiter.

use axum::http::HeaderMap;

/// First `X-Forwarded-For` hop when present, otherwise a shared bucket.
/// Good enough for throttling a single-admin deployment behind one proxy.
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
