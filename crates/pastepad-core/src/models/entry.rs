//! Clipboard entry domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use utoipa::ToSchema;

/// Kind of a clipboard entry. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Text,
    Markdown,
    Link,
    File,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Text => "text",
            EntryType::Markdown => "markdown",
            EntryType::Link => "link",
            EntryType::File => "file",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One clipboard record.
///
/// Exactly one of `content` / `file_path` is meaningful, selected by
/// `entry_type`: text/markdown/link entries carry `content`, file entries
/// carry `file_path` in the form `uploads/<filename>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ClipboardEntry {
    pub id: i64,
    pub entry_type: EntryType,
    pub title: String,
    pub content: Option<String>,
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ClipboardEntry {
    /// Filename component of `file_path` (`uploads/notes.txt` -> `notes.txt`).
    /// None for non-file entries or malformed paths.
    pub fn filename(&self) -> Option<&str> {
        self.file_path
            .as_deref()
            .and_then(|p| Path::new(p).file_name())
            .and_then(|n| n.to_str())
    }
}

/// Insert payload for the entry store. `created_at = None` means "now";
/// the sync reconciler passes the file's filesystem creation time instead.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub entry_type: EntryType,
    pub title: String,
    pub content: Option<String>,
    pub file_path: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewEntry {
    pub fn text(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::inline(EntryType::Text, title, content)
    }

    pub fn markdown(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::inline(EntryType::Markdown, title, content)
    }

    pub fn link(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::inline(EntryType::Link, title, content)
    }

    pub fn file(title: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            entry_type: EntryType::File,
            title: title.into(),
            content: None,
            file_path: Some(file_path.into()),
            created_at: None,
        }
    }

    fn inline(entry_type: EntryType, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            entry_type,
            title: title.into(),
            content: Some(content.into()),
            file_path: None,
            created_at: None,
        }
    }

    /// Backdate the entry to a filesystem timestamp.
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}
