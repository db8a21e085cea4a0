//! Application state.
//!
//! One `AppState` behind an `Arc`; upload stores are rebuilt from the current
//! settings snapshot per use, so directory changes made from the admin surface
//! take effect without a restart.

use crate::auth::limiter::AuthFailureLimiter;
use pastepad_core::{AppError, ServerConfig};
use pastepad_db::EntryRepository;
use pastepad_services::{SettingsStore, SyncService};
use pastepad_storage::LocalUploadStore;

pub struct AppState {
    pub entries: EntryRepository,
    pub sync: SyncService,
    pub settings: SettingsStore,
    pub config: ServerConfig,
    pub login_limiter: AuthFailureLimiter,
    pub is_production: bool,
}

impl AppState {
    /// Store over the share-file upload directory from the current settings.
    pub async fn upload_store(&self) -> Result<LocalUploadStore, AppError> {
        let settings = self.settings.get().await;
        LocalUploadStore::new(&settings.upload.upload_dir)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }

    /// Store over the editor media directory from the current settings.
    pub async fn editor_store(&self) -> Result<LocalUploadStore, AppError> {
        let settings = self.settings.get().await;
        LocalUploadStore::new(&settings.upload.editor_upload_dir)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
