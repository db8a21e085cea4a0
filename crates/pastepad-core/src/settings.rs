//! Runtime settings persisted as a JSON file.
//!
//! Unlike [`crate::config::ServerConfig`], these values can be changed from
//! the admin surface while the service is running. They are loaded and saved
//! explicitly (never mutated in place) so concurrent handlers always see a
//! consistent snapshot.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::sync::SyncPolicy;

pub const DEFAULT_ADMIN_PASSWORD: &str = "pastepad";
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";
pub const DEFAULT_EDITOR_UPLOAD_DIR: &str = "./editor-uploads";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    pub password: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadSettings {
    /// Root of the upload directory (share-file storage + sync scan target).
    pub upload_dir: String,
    /// Separate root for editor-embedded media (images/audio).
    pub editor_upload_dir: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
            editor_upload_dir: DEFAULT_EDITOR_UPLOAD_DIR.to_string(),
        }
    }
}

/// Full persisted settings document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub auth: AuthSettings,
    pub upload: UploadSettings,
    pub sync: SyncPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sync::{DbMissingFilePolicy, FileMissingDbPolicy};

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.auth.password, DEFAULT_ADMIN_PASSWORD);
        assert_eq!(settings.upload.upload_dir, DEFAULT_UPLOAD_DIR);
        assert_eq!(settings.sync.db_missing_file, DbMissingFilePolicy::Keep);
        assert_eq!(settings.sync.file_missing_db, FileMissingDbPolicy::Keep);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        // Older settings files may predate the sync section.
        let settings: AppSettings =
            serde_json::from_str(r#"{"auth": {"password": "hunter2"}}"#).unwrap();
        assert_eq!(settings.auth.password, "hunter2");
        assert_eq!(settings.upload.upload_dir, DEFAULT_UPLOAD_DIR);
        assert_eq!(settings.sync.txt_max_size_kb, 1024);
    }

    #[test]
    fn test_roundtrip() {
        let settings = AppSettings::default();
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let parsed: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
