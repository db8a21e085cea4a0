/// Versioned API prefix for all JSON routes.
pub const API_PREFIX: &str = "/api/v0";

/// Cap on file size for the text preview endpoint.
pub const TEXT_PREVIEW_MAX_BYTES: u64 = 10 * 1024 * 1024;
