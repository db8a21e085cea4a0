//! File/database reconciliation.
//!
//! Brings the entry store and the upload directory into the relationship the
//! configured [`SyncPolicy`] asks for. Two independent passes:
//!
//! - Pass A walks file-type entries and, under `dbMissingFile = delete`,
//!   removes rows whose backing file is gone.
//! - Pass B walks orphan files (on disk, unreferenced) and either leaves them,
//!   quarantines them, or registers them as entries — converting small
//!   `.txt`/`.md` orphans into inline text/markdown entries.
//!
//! A failure on one orphan is logged and that file is skipped; failures in
//! the directory listing or the entry store abort the whole run. Entries
//! already deleted by Pass A stay deleted (no rollback).

use pastepad_core::models::{
    DbMissingFilePolicy, EntryType, FileMissingDbPolicy, NewEntry, SyncPolicy, SyncReport,
};
use pastepad_core::AppError;
use pastepad_db::EntryRepository;
use pastepad_storage::{StorageError, UploadStore};
use std::collections::HashSet;
use std::path::Path;

#[derive(Clone)]
pub struct SyncService {
    entries: EntryRepository,
}

impl SyncService {
    pub fn new(entries: EntryRepository) -> Self {
        Self { entries }
    }

    /// Run one reconciliation over `store` under `policy`.
    ///
    /// The caller is responsible for persisting `policy` into settings before
    /// invoking this (the run itself never touches configuration).
    #[tracing::instrument(skip(self, store, policy), fields(sync.operation = "reconcile"))]
    pub async fn run(
        &self,
        store: &dyn UploadStore,
        policy: &SyncPolicy,
    ) -> Result<SyncReport, AppError> {
        let mut report = SyncReport::default();

        self.remove_dangling_entries(store, policy, &mut report)
            .await?;
        self.resolve_orphans(store, policy, &mut report).await?;

        tracing::info!(
            deleted_records = report.deleted_records,
            added_records = report.added_records,
            deleted_files = report.deleted_files,
            converted_txt_files = report.converted_txt_files,
            converted_md_files = report.converted_md_files,
            "Reconciliation completed"
        );

        Ok(report)
    }

    /// Pass A: entries whose referenced file no longer exists on disk.
    async fn remove_dangling_entries(
        &self,
        store: &dyn UploadStore,
        policy: &SyncPolicy,
        report: &mut SyncReport,
    ) -> Result<(), AppError> {
        if policy.db_missing_file != DbMissingFilePolicy::Delete {
            // keep: dangling references stay and surface as 404 on access.
            return Ok(());
        }

        for entry in self.entries.list_file_entries().await? {
            let Some(filename) = entry.filename() else {
                continue;
            };
            match store.exists(filename).await {
                Ok(true) => {}
                Ok(false) => {
                    if self.entries.delete(entry.id).await? {
                        tracing::info!(
                            entry_id = entry.id,
                            file = %filename,
                            "Deleted entry whose file is missing"
                        );
                        report.deleted_records += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        entry_id = entry.id,
                        file = %filename,
                        "Skipping entry, existence check failed"
                    );
                }
            }
        }

        Ok(())
    }

    /// Pass B: files on disk with no referencing entry.
    async fn resolve_orphans(
        &self,
        store: &dyn UploadStore,
        policy: &SyncPolicy,
        report: &mut SyncReport,
    ) -> Result<(), AppError> {
        match policy.file_missing_db {
            FileMissingDbPolicy::Keep => Ok(()),
            FileMissingDbPolicy::Delete => {
                for name in self.orphans(store).await? {
                    match store.quarantine(&name).await {
                        Ok(()) => report.deleted_files += 1,
                        Err(e) => {
                            tracing::warn!(error = %e, file = %name, "Skipping orphan, quarantine move failed");
                        }
                    }
                }
                Ok(())
            }
            FileMissingDbPolicy::Add => {
                for name in self.orphans(store).await? {
                    self.register_orphan(store, policy, &name, report).await?;
                }
                Ok(())
            }
        }
    }

    /// Directory listing minus filenames referenced by file-type entries.
    async fn orphans(&self, store: &dyn UploadStore) -> Result<Vec<String>, AppError> {
        let referenced: HashSet<String> = self
            .entries
            .file_paths()
            .await?
            .iter()
            .filter_map(|p| Path::new(p).file_name().and_then(|n| n.to_str()))
            .map(str::to_string)
            .collect();

        let files = store.list().await.map_err(storage_fault)?;

        Ok(files
            .into_iter()
            .filter(|name| !referenced.contains(name))
            .collect())
    }

    /// Turn one orphan into an entry.
    ///
    /// Small `.txt`/`.md` files become inline entries (when conversion is
    /// enabled and the size threshold allows) and the original is quarantined
    /// as redundant; everything else is registered as a file entry in place.
    /// Either way the entry is backdated to the file's creation time.
    async fn register_orphan(
        &self,
        store: &dyn UploadStore,
        policy: &SyncPolicy,
        name: &str,
        report: &mut SyncReport,
    ) -> Result<(), AppError> {
        let stat = match store.stat(name).await {
            Ok(stat) => stat,
            Err(e) => {
                tracing::warn!(error = %e, file = %name, "Skipping orphan, stat failed");
                return Ok(());
            }
        };

        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let conversion = match extension.as_deref() {
            Some("txt")
                if policy.convert_txt_to_text && stat.len <= policy.txt_max_size_kb * 1024 =>
            {
                Some(EntryType::Text)
            }
            Some("md")
                if policy.convert_md_to_markdown && stat.len <= policy.md_max_size_kb * 1024 =>
            {
                Some(EntryType::Markdown)
            }
            _ => None,
        };

        let title = file_stem(name);

        match conversion {
            Some(entry_type) => {
                let content = match store.read_text(name).await {
                    Ok(content) => content,
                    Err(e) => {
                        tracing::warn!(error = %e, file = %name, "Skipping orphan, text read failed");
                        return Ok(());
                    }
                };

                let new_entry = NewEntry {
                    entry_type,
                    title,
                    content: Some(content),
                    file_path: None,
                    created_at: Some(stat.created_at),
                };
                if let Err(e) = self.entries.create(new_entry).await {
                    tracing::warn!(error = %e, file = %name, "Skipping orphan, conversion insert failed");
                    return Ok(());
                }
                match entry_type {
                    EntryType::Text => report.converted_txt_files += 1,
                    EntryType::Markdown => report.converted_md_files += 1,
                    _ => {}
                }
                tracing::info!(file = %name, entry_type = %entry_type, "Converted orphan to inline entry");

                // The file content now lives in the entry; the original is
                // redundant and moves aside with the other removed files.
                match store.quarantine(name).await {
                    Ok(()) => report.deleted_files += 1,
                    Err(e) => {
                        tracing::warn!(error = %e, file = %name, "Converted file left in place, quarantine move failed");
                    }
                }
            }
            None => {
                let entry = NewEntry::file(title, format!("uploads/{}", name))
                    .created_at(stat.created_at);
                self.entries.create(entry).await?;
                tracing::info!(file = %name, "Registered orphan as file entry");
                report.added_records += 1;
            }
        }

        Ok(())
    }
}

fn storage_fault(err: StorageError) -> AppError {
    AppError::Storage(err.to_string())
}

/// `notes.txt` -> `notes`, `archive.tar.gz` -> `archive.tar`, `README` -> `README`.
fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pastepad_core::models::ClipboardEntry;
    use pastepad_storage::{LocalUploadStore, QUARANTINE_DIR};
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    struct Fixture {
        _dir: tempfile::TempDir,
        repo: EntryRepository,
        store: LocalUploadStore,
        service: SyncService,
        uploads: std::path::PathBuf,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();

        let db_path = dir.path().join("pastepad.db");
        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))
            .unwrap()
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::migrate!("../../migrations").run(&pool).await.unwrap();

        let uploads = dir.path().join("uploads");
        let store = LocalUploadStore::new(&uploads).await.unwrap();
        let repo = EntryRepository::new(pool);
        let service = SyncService::new(repo.clone());

        Fixture {
            _dir: dir,
            repo,
            store,
            service,
            uploads,
        }
    }

    fn write_file(fx: &Fixture, name: &str, data: &[u8]) {
        std::fs::write(fx.uploads.join(name), data).unwrap();
    }

    async fn file_entry(fx: &Fixture, name: &str) -> ClipboardEntry {
        fx.repo
            .create(NewEntry::file(file_stem(name), format!("uploads/{}", name)))
            .await
            .unwrap()
    }

    fn policy() -> SyncPolicy {
        SyncPolicy::default()
    }

    #[tokio::test]
    async fn test_pass_a_delete_removes_exactly_dangling_entries() {
        let fx = fixture().await;

        write_file(&fx, "kept.bin", b"data");
        let kept = file_entry(&fx, "kept.bin").await;
        let dangling = file_entry(&fx, "c.png").await;
        let inline = fx.repo.create(NewEntry::text("note", "hi")).await.unwrap();

        let mut p = policy();
        p.db_missing_file = DbMissingFilePolicy::Delete;
        let report = fx.service.run(&fx.store, &p).await.unwrap();

        assert_eq!(report.deleted_records, 1);
        assert!(fx.repo.get(dangling.id).await.unwrap().is_none());
        assert!(fx.repo.get(kept.id).await.unwrap().is_some());
        assert!(fx.repo.get(inline.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_pass_a_keep_leaves_store_unchanged() {
        let fx = fixture().await;
        let dangling = file_entry(&fx, "gone.png").await;

        let report = fx.service.run(&fx.store, &policy()).await.unwrap();

        assert_eq!(report, SyncReport::default());
        assert!(fx.repo.get(dangling.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_policy_quarantines_every_orphan_and_only_orphans() {
        let fx = fixture().await;

        write_file(&fx, "a.bin", b"\x01\x02\x03");
        write_file(&fx, "b.bin", b"bbbb");
        write_file(&fx, "known.bin", b"known");
        file_entry(&fx, "known.bin").await;

        let mut p = policy();
        p.file_missing_db = FileMissingDbPolicy::Delete;
        let report = fx.service.run(&fx.store, &p).await.unwrap();

        assert_eq!(report.deleted_files, 2);
        assert_eq!(report.added_records, 0);

        let quarantine = fx.uploads.join(QUARANTINE_DIR);
        assert_eq!(std::fs::read(quarantine.join("a.bin")).unwrap(), b"\x01\x02\x03");
        assert_eq!(std::fs::read(quarantine.join("b.bin")).unwrap(), b"bbbb");
        assert!(!fx.uploads.join("a.bin").exists());
        assert!(fx.uploads.join("known.bin").exists());
    }

    #[tokio::test]
    async fn test_add_policy_registers_orphans_and_is_idempotent() {
        let fx = fixture().await;
        write_file(&fx, "data.bin", b"payload");

        let mut p = policy();
        p.file_missing_db = FileMissingDbPolicy::Add;

        let first = fx.service.run(&fx.store, &p).await.unwrap();
        assert_eq!(first.added_records, 1);

        let entries = fx.repo.list_file_entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_path.as_deref(), Some("uploads/data.bin"));
        assert_eq!(entries[0].title, "data");

        // The new reference makes the file no longer an orphan.
        let second = fx.service.run(&fx.store, &p).await.unwrap();
        assert_eq!(second, SyncReport::default());
        assert_eq!(fx.repo.list_file_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_txt_conversion_creates_text_entry_and_quarantines_original() {
        let fx = fixture().await;
        let content = "line one\nline two\n".repeat(100); // ~2 KB
        write_file(&fx, "notes.txt", content.as_bytes());
        let birth = fx.store.stat("notes.txt").await.unwrap().created_at;

        let mut p = policy();
        p.file_missing_db = FileMissingDbPolicy::Add;
        p.convert_txt_to_text = true;
        p.txt_max_size_kb = 10;

        let report = fx.service.run(&fx.store, &p).await.unwrap();
        assert_eq!(report.converted_txt_files, 1);
        assert_eq!(report.deleted_files, 1);
        assert_eq!(report.added_records, 0);

        let entries = fx.repo.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, EntryType::Text);
        assert_eq!(entries[0].title, "notes");
        assert_eq!(entries[0].content.as_deref(), Some(content.as_str()));
        assert_eq!(entries[0].file_path, None);
        assert_eq!(entries[0].created_at.timestamp(), birth.timestamp());

        assert!(!fx.uploads.join("notes.txt").exists());
        assert!(fx.uploads.join(QUARANTINE_DIR).join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_md_over_threshold_is_added_as_file_entry() {
        let fx = fixture().await;
        // 2048 KB against a 1024 KB limit.
        write_file(&fx, "big.md", &vec![b'#'; 2048 * 1024]);

        let mut p = policy();
        p.file_missing_db = FileMissingDbPolicy::Add;
        p.convert_md_to_markdown = true;
        p.md_max_size_kb = 1024;

        let report = fx.service.run(&fx.store, &p).await.unwrap();
        assert_eq!(report.converted_md_files, 0);
        assert_eq!(report.added_records, 1);
        assert_eq!(report.deleted_files, 0);

        let entries = fx.repo.list_file_entries().await.unwrap();
        assert_eq!(entries[0].file_path.as_deref(), Some("uploads/big.md"));
        assert!(fx.uploads.join("big.md").exists());
    }

    #[tokio::test]
    async fn test_size_exactly_at_threshold_converts() {
        let fx = fixture().await;
        write_file(&fx, "edge.md", &vec![b'x'; 4 * 1024]);

        let mut p = policy();
        p.file_missing_db = FileMissingDbPolicy::Add;
        p.convert_md_to_markdown = true;
        p.md_max_size_kb = 4;

        let report = fx.service.run(&fx.store, &p).await.unwrap();
        assert_eq!(report.converted_md_files, 1);
        assert_eq!(report.added_records, 0);
    }

    #[tokio::test]
    async fn test_conversion_disabled_adds_txt_as_file_entry() {
        let fx = fixture().await;
        write_file(&fx, "plain.txt", b"text");

        let mut p = policy();
        p.file_missing_db = FileMissingDbPolicy::Add;
        // convert_txt_to_text stays false

        let report = fx.service.run(&fx.store, &p).await.unwrap();
        assert_eq!(report.added_records, 1);
        assert_eq!(report.converted_txt_files, 0);
        assert!(fx.uploads.join("plain.txt").exists());
    }

    #[tokio::test]
    async fn test_unreadable_orphan_is_skipped_and_others_proceed() {
        let fx = fixture().await;
        write_file(&fx, "broken.txt", &[0xff, 0xfe, 0x80]); // not UTF-8
        write_file(&fx, "fine.txt", b"ok");

        let mut p = policy();
        p.file_missing_db = FileMissingDbPolicy::Add;
        p.convert_txt_to_text = true;
        p.txt_max_size_kb = 10;

        let report = fx.service.run(&fx.store, &p).await.unwrap();

        // broken.txt stays in its pre-reconciliation state, uncounted.
        assert_eq!(report.converted_txt_files, 1);
        assert_eq!(report.deleted_files, 1);
        assert_eq!(report.added_records, 0);
        assert!(fx.uploads.join("broken.txt").exists());
        assert_eq!(fx.repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_combined_scenario() {
        // Upload dir: a.txt (orphan, 1 KB), b.bin (orphan, 5 KB);
        // store: one file entry pointing at missing c.png.
        let fx = fixture().await;
        let a_content = "a".repeat(1024);
        write_file(&fx, "a.txt", a_content.as_bytes());
        write_file(&fx, "b.bin", &vec![0u8; 5 * 1024]);
        let dangling = file_entry(&fx, "c.png").await;

        let mut p = policy();
        p.db_missing_file = DbMissingFilePolicy::Delete;
        p.file_missing_db = FileMissingDbPolicy::Add;
        p.convert_txt_to_text = true;
        p.txt_max_size_kb = 1024;

        let report = fx.service.run(&fx.store, &p).await.unwrap();

        assert_eq!(report.deleted_records, 1);
        assert_eq!(report.converted_txt_files, 1);
        assert_eq!(report.deleted_files, 1);
        assert_eq!(report.added_records, 1);
        assert_eq!(report.converted_md_files, 0);

        assert!(fx.repo.get(dangling.id).await.unwrap().is_none());
        assert!(fx.uploads.join(QUARANTINE_DIR).join("a.txt").exists());
        assert!(fx.uploads.join("b.bin").exists());

        let entries = fx.repo.list().await.unwrap();
        let text = entries
            .iter()
            .find(|e| e.entry_type == EntryType::Text)
            .unwrap();
        assert_eq!(text.title, "a");
        assert_eq!(text.content.as_deref(), Some(a_content.as_str()));
        let file = entries
            .iter()
            .find(|e| e.entry_type == EntryType::File)
            .unwrap();
        assert_eq!(file.file_path.as_deref(), Some("uploads/b.bin"));
    }

    #[tokio::test]
    async fn test_quarantined_files_are_invisible_to_later_runs() {
        let fx = fixture().await;
        write_file(&fx, "orphan.bin", b"x");

        let mut p = policy();
        p.file_missing_db = FileMissingDbPolicy::Delete;
        fx.service.run(&fx.store, &p).await.unwrap();

        // Second run sees an empty directory; nothing to do under any policy.
        p.file_missing_db = FileMissingDbPolicy::Add;
        let report = fx.service.run(&fx.store, &p).await.unwrap();
        assert_eq!(report, SyncReport::default());
        assert!(fx.repo.list().await.unwrap().is_empty());
    }
}
