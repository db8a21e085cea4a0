//! Shared fixtures for integration tests: a full application over a scratch
//! SQLite database and temp upload directories.

use axum_test::TestServer;
use pastepad_api::setup;
use pastepad_api::state::AppState;
use pastepad_core::{AppSettings, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Default admin password from AppSettings::default().
pub const TEST_PASSWORD: &str = "pastepad";

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub dir: TempDir,
}

impl TestApp {
    pub fn uploads_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }
}

pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        server_port: 0,
        database_url: format!("sqlite://{}", dir.path().join("pastepad.db").display()),
        settings_path: dir.path().join("config.json").display().to_string(),
        cors_origins: vec!["*".to_string()],
        db_max_connections: 2,
        db_timeout_seconds: 30,
        token_secret: "integration-test-secret-0123456789ab".to_string(),
        token_expiry_hours: 1,
        max_upload_size_bytes: 20 * 1024 * 1024,
        editor_allowed_content_types: vec![
            "image/png".to_string(),
            "image/jpeg".to_string(),
            "audio/mpeg".to_string(),
        ],
        login_max_failures: 3,
        login_failure_window_seconds: 300,
        environment: "test".to_string(),
    }
}

/// Boot a full application in a tempdir.
pub async fn setup_test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");

    // Point both upload directories into the tempdir before first start.
    let mut settings = AppSettings::default();
    settings.upload.upload_dir = dir.path().join("uploads").display().to_string();
    settings.upload.editor_upload_dir = dir.path().join("editor-uploads").display().to_string();
    std::fs::write(
        dir.path().join("config.json"),
        serde_json::to_string_pretty(&settings).expect("serialize settings"),
    )
    .expect("write settings");

    let (state, router) = setup::initialize_app(test_config(&dir))
        .await
        .expect("Failed to initialize app");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp { server, state, dir }
}

/// Log in with the default password and return a bearer token.
pub async fn login(app: &TestApp) -> String {
    let response = app
        .server
        .post("/api/v0/auth/login")
        .json(&serde_json::json!({ "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();
    response.json::<serde_json::Value>()["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}
