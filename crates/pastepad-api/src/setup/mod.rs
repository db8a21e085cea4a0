//! Application setup and initialization
//!
//! All initialization logic lives here rather than in main.rs, so tests can
//! build the full router against a scratch database and directory.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::limiter::AuthFailureLimiter;
use crate::state::AppState;
use anyhow::{Context, Result};
use pastepad_core::ServerConfig;
use pastepad_db::EntryRepository;
use pastepad_services::{SettingsStore, SyncService};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: ServerConfig) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry();

    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    let settings = SettingsStore::open(&config.settings_path)
        .await
        .context("Failed to load settings")?;
    let snapshot = settings.get().await;
    storage::ensure_upload_dirs(&snapshot).await?;

    let pool = database::setup_database(&config).await?;
    let entries = EntryRepository::new(pool);
    let sync = SyncService::new(entries.clone());

    let login_limiter = AuthFailureLimiter::new(
        config.login_max_failures,
        config.login_failure_window_seconds,
    );

    let state = Arc::new(AppState {
        entries,
        sync,
        settings,
        login_limiter,
        is_production: config.is_production(),
        config,
    });

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
