use crate::traits::{FileStat, StorageError, StorageResult, UploadStore, QUARANTINE_DIR};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem upload store
#[derive(Clone)]
pub struct LocalUploadStore {
    root: PathBuf,
}

impl LocalUploadStore {
    /// Create a new store rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(LocalUploadStore { root })
    }

    /// Resolve a filename to a path inside the root.
    ///
    /// Names come from the database and from URLs; anything that could point
    /// outside the root (separators, `..`) is rejected here.
    fn resolve(&self, name: &str) -> StorageResult<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    fn map_io(name: &str, err: std::io::Error) -> StorageError {
        if err.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(name.to_string())
        } else {
            StorageError::Io(err)
        }
    }

    /// Split a filename into (stem, extension-with-dot) on the last dot.
    fn split_name(name: &str) -> (&str, &str) {
        match name.rfind('.') {
            Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
            _ => (name, ""),
        }
    }

    /// First available variant of `name`: `name`, `name (1).ext`, `name (2).ext`, ...
    async fn unique_name(&self, name: &str) -> StorageResult<String> {
        let (stem, ext) = Self::split_name(name);
        let mut candidate = name.to_string();
        let mut counter = 1u32;
        while fs::try_exists(self.root.join(&candidate)).await? {
            candidate = format!("{} ({}){}", stem, counter, ext);
            counter += 1;
        }
        Ok(candidate)
    }
}

fn to_utc(time: std::time::SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn list(&self) -> StorageResult<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            // The quarantine subdirectory (and everything under it) is not
            // part of the scanned state.
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                if name != QUARANTINE_DIR {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    async fn exists(&self, name: &str) -> StorageResult<bool> {
        let path = self.resolve(name)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn stat(&self, name: &str) -> StorageResult<FileStat> {
        let path = self.resolve(name)?;
        let meta = fs::metadata(&path)
            .await
            .map_err(|e| Self::map_io(name, e))?;
        let modified = meta.modified()?;
        // Not every filesystem records a birth time; fall back to mtime.
        let created = meta.created().unwrap_or(modified);
        Ok(FileStat {
            len: meta.len(),
            created_at: to_utc(created),
            modified_at: to_utc(modified),
        })
    }

    async fn read_text(&self, name: &str) -> StorageResult<String> {
        let path = self.resolve(name)?;
        fs::read_to_string(&path)
            .await
            .map_err(|e| Self::map_io(name, e))
    }

    async fn save(&self, name: &str, data: &[u8]) -> StorageResult<String> {
        self.resolve(name)?;
        let stored = self.unique_name(name).await?;
        let path = self.root.join(&stored);

        let mut file = fs::File::create(&path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;

        tracing::info!(
            path = %path.display(),
            size_bytes = data.len(),
            "Stored upload"
        );

        Ok(stored)
    }

    async fn remove(&self, name: &str) -> StorageResult<()> {
        let path = self.resolve(name)?;
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }
        fs::remove_file(&path).await?;
        tracing::info!(path = %path.display(), "Removed upload");
        Ok(())
    }

    async fn quarantine(&self, name: &str) -> StorageResult<()> {
        let src = self.resolve(name)?;
        if !fs::try_exists(&src).await.unwrap_or(false) {
            return Err(StorageError::NotFound(name.to_string()));
        }
        let quarantine_dir = self.root.join(QUARANTINE_DIR);
        fs::create_dir_all(&quarantine_dir).await?;
        let dest = quarantine_dir.join(name);
        fs::rename(&src, &dest).await?;

        tracing::info!(
            from = %src.display(),
            to = %dest.display(),
            "Quarantined file"
        );

        Ok(())
    }

    async fn open(&self, name: &str) -> StorageResult<tokio::fs::File> {
        let path = self.resolve(name)?;
        fs::File::open(&path)
            .await
            .map_err(|e| Self::map_io(name, e))
    }
}
