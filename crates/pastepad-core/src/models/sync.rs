//! Sync reconciliation policy and result model.
//!
//! Policies are closed enumerations: an unrecognized value in a request or a
//! settings file is a deserialization error, never a silent default.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const DEFAULT_MAX_SIZE_KB: u64 = 1024;

/// Action for an entry whose referenced file no longer exists on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DbMissingFilePolicy {
    /// Leave the dangling entry; file access surfaces as 404.
    #[default]
    Keep,
    /// Delete the entry record.
    Delete,
}

/// Action for a file on disk with no referencing entry (an orphan).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileMissingDbPolicy {
    #[default]
    Keep,
    /// Register the orphan as an entry (possibly converting small .txt/.md
    /// files to inline entries).
    Add,
    /// Move the orphan into the quarantine subdirectory.
    Delete,
}

/// Reconciler policy, persisted as part of the settings document and
/// overridable per run from the sync endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncPolicy {
    pub db_missing_file: DbMissingFilePolicy,
    pub file_missing_db: FileMissingDbPolicy,
    pub convert_txt_to_text: bool,
    /// Max size in KB for a .txt orphan to be converted to a text entry.
    #[serde(rename = "txtMaxSize")]
    pub txt_max_size_kb: u64,
    pub convert_md_to_markdown: bool,
    /// Max size in KB for a .md orphan to be converted to a markdown entry.
    #[serde(rename = "mdMaxSize")]
    pub md_max_size_kb: u64,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            db_missing_file: DbMissingFilePolicy::Keep,
            file_missing_db: FileMissingDbPolicy::Keep,
            convert_txt_to_text: false,
            txt_max_size_kb: DEFAULT_MAX_SIZE_KB,
            convert_md_to_markdown: false,
            md_max_size_kb: DEFAULT_MAX_SIZE_KB,
        }
    }
}

/// Counters reported by one reconciliation run.
///
/// `deleted_files` counts every quarantine move: orphans removed by policy and
/// originals superseded by a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub deleted_records: u64,
    pub added_records: u64,
    pub deleted_files: u64,
    pub converted_txt_files: u64,
    pub converted_md_files: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults_are_keep() {
        let policy = SyncPolicy::default();
        assert_eq!(policy.db_missing_file, DbMissingFilePolicy::Keep);
        assert_eq!(policy.file_missing_db, FileMissingDbPolicy::Keep);
        assert!(!policy.convert_txt_to_text);
        assert_eq!(policy.txt_max_size_kb, DEFAULT_MAX_SIZE_KB);
    }

    #[test]
    fn test_policy_parses_lowercase_values() {
        let policy: SyncPolicy = serde_json::from_str(
            r#"{"dbMissingFile": "delete", "fileMissingDb": "add", "convertTxtToText": true, "txtMaxSize": 10}"#,
        )
        .unwrap();
        assert_eq!(policy.db_missing_file, DbMissingFilePolicy::Delete);
        assert_eq!(policy.file_missing_db, FileMissingDbPolicy::Add);
        assert!(policy.convert_txt_to_text);
        assert_eq!(policy.txt_max_size_kb, 10);
        // Unspecified fields fall back to defaults.
        assert_eq!(policy.md_max_size_kb, DEFAULT_MAX_SIZE_KB);
    }

    #[test]
    fn test_unknown_policy_value_is_rejected() {
        let result = serde_json::from_str::<SyncPolicy>(r#"{"fileMissingDb": "recreate"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = SyncReport {
            deleted_records: 1,
            added_records: 2,
            deleted_files: 3,
            converted_txt_files: 4,
            converted_md_files: 5,
        };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["deletedRecords"], 1);
        assert_eq!(json["convertedMdFiles"], 5);
    }
}
