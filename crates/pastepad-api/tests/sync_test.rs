mod helpers;

use helpers::{login, setup_test_app};
use http::StatusCode;
use pastepad_core::models::NewEntry;
use serde_json::json;

#[tokio::test]
async fn test_sync_endpoint_reports_counters() {
    let app = setup_test_app().await;
    let token = login(&app).await;

    // Orphans on disk, plus one dangling file entry.
    std::fs::write(app.uploads_dir().join("a.txt"), "a".repeat(1024)).unwrap();
    std::fs::write(app.uploads_dir().join("b.bin"), vec![0u8; 5 * 1024]).unwrap();
    app.state
        .entries
        .create(NewEntry::file("c", "uploads/c.png"))
        .await
        .unwrap();

    let response = app
        .server
        .post("/api/v0/admin/sync")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "dbMissingFile": "delete",
            "fileMissingDb": "add",
            "convertTxtToText": true,
            "txtMaxSize": 1024,
            "convertMdToMarkdown": false,
            "mdMaxSize": 1024
        }))
        .await;
    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["deletedRecords"], 1);
    assert_eq!(body["addedRecords"], 1);
    assert_eq!(body["deletedFiles"], 1);
    assert_eq!(body["convertedTxtFiles"], 1);
    assert_eq!(body["convertedMdFiles"], 0);

    // a.txt became inline and was quarantined; b.bin stayed in place.
    assert!(!app.uploads_dir().join("a.txt").exists());
    assert!(app.uploads_dir().join("deleted").join("a.txt").exists());
    assert!(app.uploads_dir().join("b.bin").exists());
}

#[tokio::test]
async fn test_sync_persists_submitted_policy() {
    let app = setup_test_app().await;
    let token = login(&app).await;

    let response = app
        .server
        .post("/api/v0/admin/sync")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "fileMissingDb": "add", "convertMdToMarkdown": true }))
        .await;
    response.assert_status_ok();

    let response = app
        .server
        .get("/api/v0/admin/settings")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    response.assert_status_ok();

    let settings = response.json::<serde_json::Value>();
    assert_eq!(settings["sync"]["fileMissingDb"], "add");
    assert_eq!(settings["sync"]["convertMdToMarkdown"], true);
    // The password never leaks through the settings endpoint.
    assert!(settings.get("auth").is_none());
}

#[tokio::test]
async fn test_unknown_policy_value_is_rejected_before_any_mutation() {
    let app = setup_test_app().await;
    let token = login(&app).await;

    std::fs::write(app.uploads_dir().join("orphan.bin"), b"x").unwrap();

    let response = app
        .server
        .post("/api/v0/admin/sync")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "fileMissingDb": "recreate" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Nothing moved, nothing persisted.
    assert!(app.uploads_dir().join("orphan.bin").exists());
    let response = app
        .server
        .get("/api/v0/admin/settings")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    assert_eq!(
        response.json::<serde_json::Value>()["sync"]["fileMissingDb"],
        "keep"
    );
}

#[tokio::test]
async fn test_sync_requires_auth() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/v0/admin/sync")
        .json(&json!({ "fileMissingDb": "keep" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_password_change_takes_effect() {
    let app = setup_test_app().await;
    let token = login(&app).await;

    let response = app
        .server
        .put("/api/v0/admin/password")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "password": "new-secret" }))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    // Old password no longer works; new one does.
    let response = app
        .server
        .post("/api/v0/auth/login")
        .json(&json!({ "password": helpers::TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .post("/api/v0/auth/login")
        .json(&json!({ "password": "new-secret" }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_admin_upload_dirs_update() {
    let app = setup_test_app().await;
    let token = login(&app).await;

    let new_uploads = app.dir.path().join("moved-uploads");
    let new_editor = app.dir.path().join("moved-editor");

    let response = app
        .server
        .put("/api/v0/admin/upload-dirs")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "uploadDir": new_uploads.display().to_string(),
            "editorUploadDir": new_editor.display().to_string()
        }))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    // Both directories were created and persisted.
    assert!(new_uploads.is_dir());
    assert!(new_editor.is_dir());

    let response = app
        .server
        .get("/api/v0/admin/settings")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    let settings = response.json::<serde_json::Value>();
    assert_eq!(
        settings["upload"]["uploadDir"],
        new_uploads.display().to_string()
    );
}
