//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use pastepad_core::ServerConfig;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Setup all application routes
pub fn setup_routes(config: &ServerConfig, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Public routes (no authentication required): health, login, and the
    // share-link surface (single entry + file access).
    let public_routes = Router::new()
        .route("/healthz", get(handlers::health::liveness))
        .route("/readyz", get(handlers::health::readiness))
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route(
            &format!("{}/auth/login", API_PREFIX),
            post(handlers::auth::login),
        )
        .route(
            &format!("{}/share/{{id}}", API_PREFIX),
            get(handlers::entry_get::share_entry),
        )
        .route(
            &format!("{}/files/{{id}}/download", API_PREFIX),
            get(handlers::file_download::download_file),
        )
        .route(
            &format!("{}/files/{{id}}/info", API_PREFIX),
            get(handlers::file_info::file_info),
        )
        .route(
            &format!("{}/files/{{id}}/preview", API_PREFIX),
            get(handlers::text_preview::text_preview),
        )
        .route(
            &format!("{}/editor-uploads/{{filename}}", API_PREFIX),
            get(handlers::editor_upload::serve_editor_file),
        )
        .with_state(state.clone());

    // Protected routes (require a bearer token)
    let protected_routes = Router::new()
        .route(
            &format!("{}/entries", API_PREFIX),
            get(handlers::entry_list::list_entries),
        )
        .route(
            &format!("{}/entries/text", API_PREFIX),
            post(handlers::entry_create::create_text),
        )
        .route(
            &format!("{}/entries/markdown", API_PREFIX),
            post(handlers::entry_create::create_markdown),
        )
        .route(
            &format!("{}/entries/link", API_PREFIX),
            post(handlers::entry_create::create_link),
        )
        .route(
            &format!("{}/entries/file", API_PREFIX),
            post(handlers::file_upload::upload_file),
        )
        .route(
            &format!("{}/entries/{{id}}", API_PREFIX),
            get(handlers::entry_get::get_entry)
                .put(handlers::entry_update::update_entry)
                .delete(handlers::entry_delete::delete_entry),
        )
        .route(
            &format!("{}/editor-uploads", API_PREFIX),
            post(handlers::editor_upload::upload_editor_file),
        )
        .route(
            &format!("{}/admin/settings", API_PREFIX),
            get(handlers::admin_settings::get_settings),
        )
        .route(
            &format!("{}/admin/password", API_PREFIX),
            put(handlers::admin_settings::update_password),
        )
        .route(
            &format!("{}/admin/upload-dirs", API_PREFIX),
            put(handlers::admin_settings::update_upload_dirs),
        )
        .route(
            &format!("{}/admin/sync", API_PREFIX),
            post(handlers::sync_run::run_sync),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::auth_middleware,
        ))
        .with_state(state);

    let app = public_routes
        .merge(protected_routes)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        // Axum's built-in 2 MB cap would reject uploads before the
        // tower-http limit applies.
        .layer(DefaultBodyLimit::max(config.max_upload_size_bytes))
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &ServerConfig) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    };

    Ok(cors)
}
