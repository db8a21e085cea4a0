//! Upload directory setup

use anyhow::{Context, Result};
use pastepad_core::AppSettings;
use pastepad_storage::LocalUploadStore;

/// Ensure both upload directories exist before the server accepts requests.
pub async fn ensure_upload_dirs(settings: &AppSettings) -> Result<()> {
    LocalUploadStore::new(&settings.upload.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", settings.upload.upload_dir))?;
    LocalUploadStore::new(&settings.upload.editor_upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create editor upload dir {}",
                settings.upload.editor_upload_dir
            )
        })?;

    tracing::info!(
        upload_dir = %settings.upload.upload_dir,
        editor_upload_dir = %settings.upload.editor_upload_dir,
        "Upload directories ready"
    );

    Ok(())
}
