use chrono::Utc;
use pastepad_core::models::{ClipboardEntry, NewEntry};
use pastepad_core::AppError;
use sqlx::{Sqlite, SqlitePool};

/// Repository for clipboard entries.
///
/// Every method issues exactly one statement. Removal of a file entry's
/// backing file is the caller's concern (HTTP delete handler / reconciler),
/// keeping the repository free of filesystem knowledge.
#[derive(Clone)]
pub struct EntryRepository {
    pool: SqlitePool,
}

impl EntryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, entry), fields(db.table = "entries", db.operation = "insert", entry_type = %entry.entry_type))]
    pub async fn create(&self, entry: NewEntry) -> Result<ClipboardEntry, AppError> {
        let created_at = entry.created_at.unwrap_or_else(Utc::now);

        let row = sqlx::query_as::<Sqlite, ClipboardEntry>(
            r#"
            INSERT INTO entries (entry_type, title, content, file_path, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, entry_type, title, content, file_path, created_at
            "#,
        )
        .bind(entry.entry_type)
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(&entry.file_path)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "entries", db.operation = "select"))]
    pub async fn get(&self, id: i64) -> Result<Option<ClipboardEntry>, AppError> {
        let row = sqlx::query_as::<Sqlite, ClipboardEntry>(
            "SELECT id, entry_type, title, content, file_path, created_at FROM entries WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// All entries, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "entries", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<ClipboardEntry>, AppError> {
        let rows = sqlx::query_as::<Sqlite, ClipboardEntry>(
            r#"
            SELECT id, entry_type, title, content, file_path, created_at
            FROM entries
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// File-type entries only; the reconciler's Pass A input.
    #[tracing::instrument(skip(self), fields(db.table = "entries", db.operation = "select"))]
    pub async fn list_file_entries(&self) -> Result<Vec<ClipboardEntry>, AppError> {
        let rows = sqlx::query_as::<Sqlite, ClipboardEntry>(
            r#"
            SELECT id, entry_type, title, content, file_path, created_at
            FROM entries
            WHERE entry_type = 'file'
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Referenced file paths (`uploads/<filename>`); the reconciler's Pass B input.
    #[tracing::instrument(skip(self), fields(db.table = "entries", db.operation = "select"))]
    pub async fn file_paths(&self) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT file_path FROM entries WHERE entry_type = 'file' AND file_path IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(p,)| p).collect())
    }

    /// Update title and content. `file_path` and `entry_type` are immutable
    /// after creation. Returns false when no row matched.
    #[tracing::instrument(skip(self, title, content), fields(db.table = "entries", db.operation = "update"))]
    pub async fn update(&self, id: i64, title: &str, content: Option<&str>) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE entries SET title = ?, content = ? WHERE id = ?")
            .bind(title)
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns false when no row matched.
    #[tracing::instrument(skip(self), fields(db.table = "entries", db.operation = "delete"))]
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
