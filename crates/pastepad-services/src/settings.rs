//! Persisted runtime settings.
//!
//! Settings live in a JSON file next to the service. Handlers read immutable
//! snapshots and persist changes through an explicit [`SettingsStore::save`];
//! the in-memory copy is only replaced after the file write succeeds.

use pastepad_core::{AppError, AppSettings};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

pub struct SettingsStore {
    path: PathBuf,
    current: RwLock<AppSettings>,
}

impl SettingsStore {
    /// Load settings from `path`, writing a default document on first start.
    /// A present-but-unparseable file is an error rather than a silent reset.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let settings = if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
                AppError::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                AppError::Config(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            let defaults = AppSettings::default();
            write_settings(&path, &defaults).await?;
            tracing::info!(path = %path.display(), "Created default settings file");
            defaults
        };

        Ok(Self {
            path,
            current: RwLock::new(settings),
        })
    }

    /// Current settings snapshot.
    pub async fn get(&self) -> AppSettings {
        self.current.read().await.clone()
    }

    /// Persist `settings` and replace the in-memory snapshot.
    pub async fn save(&self, settings: AppSettings) -> Result<(), AppError> {
        let mut guard = self.current.write().await;
        write_settings(&self.path, &settings).await?;
        *guard = settings;
        Ok(())
    }
}

async fn write_settings(path: &Path, settings: &AppSettings) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Config(format!("Failed to serialize settings: {}", e)))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| AppError::Config(format!("Failed to write {}: {}", path.display(), e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pastepad_core::models::sync::FileMissingDbPolicy;

    #[tokio::test]
    async fn test_open_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let store = SettingsStore::open(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(store.get().await, AppSettings::default());
    }

    #[tokio::test]
    async fn test_save_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let store = SettingsStore::open(&path).await.unwrap();
        let mut settings = store.get().await;
        settings.auth.password = "changed".to_string();
        settings.sync.file_missing_db = FileMissingDbPolicy::Add;
        store.save(settings.clone()).await.unwrap();

        let reopened = SettingsStore::open(&path).await.unwrap();
        assert_eq!(reopened.get().await, settings);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            SettingsStore::open(&path).await,
            Err(AppError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_policy_value_in_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"sync": {"fileMissingDb": "recreate"}}"#).unwrap();

        assert!(matches!(
            SettingsStore::open(&path).await,
            Err(AppError::Config(_))
        ));
    }
}
