//! Upload store abstraction trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;
use thiserror::Error;

/// Reserved subdirectory that reconciliation relocates orphaned files into.
/// Excluded from every directory scan.
pub const QUARANTINE_DIR: &str = "deleted";

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Filesystem metadata for one stored file.
#[derive(Debug, Clone, Copy)]
pub struct FileStat {
    pub len: u64,
    /// Creation (birth) time where the filesystem records one, otherwise the
    /// modification time.
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Upload directory provider.
///
/// Names are bare filenames inside the store root; anything containing a path
/// separator or `..` is rejected with `InvalidName` so a name from the
/// database or a URL can never escape the directory.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Root directory of the store.
    fn root(&self) -> &Path;

    /// Regular files directly under the root, excluding the quarantine
    /// subdirectory and anything inside it. Directory-listing order.
    async fn list(&self) -> StorageResult<Vec<String>>;

    async fn exists(&self, name: &str) -> StorageResult<bool>;

    async fn stat(&self, name: &str) -> StorageResult<FileStat>;

    /// Read the whole file as UTF-8 text.
    async fn read_text(&self, name: &str) -> StorageResult<String>;

    /// Write `data` under `name`, resolving collisions as `name (N).ext`.
    /// Returns the filename actually stored.
    async fn save(&self, name: &str, data: &[u8]) -> StorageResult<String>;

    async fn remove(&self, name: &str) -> StorageResult<()>;

    /// Move a file into the quarantine subdirectory (created on demand),
    /// preserving its filename.
    async fn quarantine(&self, name: &str) -> StorageResult<()>;

    /// Open the file for streamed reads (downloads, range requests).
    async fn open(&self, name: &str) -> StorageResult<tokio::fs::File>;
}
