//! Backup/restore table plan.
//!
//! The order of [`BACKUP_TABLES`] is the restore order: parents before
//! children, so foreign keys resolve as rows arrive. `people` and `families`
//! are critical; if either fails the whole restore stops.

use serde::Serialize;

use crate::error::CoreError;

/// Rows per upsert request.
pub const RESTORE_CHUNK_SIZE: usize = 500;

/// Version stamped into exported backups.
pub const BACKUP_FORMAT_VERSION: u32 = 1;

/// Static description of one table in the backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    /// Natural unique key used as the upsert conflict target.
    pub conflict_target: &'static [&'static str],
    /// Columns written on restore (and the only keys read from backup rows).
    pub columns: &'static [&'static str],
    /// A failure on this table aborts the restore.
    pub critical: bool,
}

impl TableSpec {
    /// Columns updated when a conflicting row already exists.
    pub fn update_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns
            .iter()
            .copied()
            .filter(|c| !self.conflict_target.contains(c) && *c != "id")
    }
}

pub const BACKUP_TABLES: &[TableSpec] = &[
    TableSpec {
        name: "people",
        conflict_target: &["handle"],
        columns: &[
            "id",
            "handle",
            "display_name",
            "gender",
            "generation",
            "birth_year",
            "birth_month",
            "birth_day",
            "death_year",
            "death_month",
            "death_day",
            "is_living",
            "occupation",
            "current_address",
            "hometown",
            "phone",
            "email",
            "education",
            "biography",
            "nick_name",
            "notes",
            "avatar_url",
            "created_at",
            "updated_at",
        ],
        critical: true,
    },
    TableSpec {
        name: "families",
        conflict_target: &["handle"],
        columns: &["id", "handle", "father_handle", "mother_handle", "created_at"],
        critical: true,
    },
    TableSpec {
        name: "profiles",
        conflict_target: &["id"],
        columns: &["id", "email", "display_name", "role", "status", "created_at"],
        critical: false,
    },
    TableSpec {
        name: "family_questions",
        conflict_target: &["id"],
        columns: &["id", "question", "hint", "correct_answer", "is_active", "created_at"],
        critical: false,
    },
    TableSpec {
        name: "events",
        conflict_target: &["id"],
        columns: &[
            "id",
            "title",
            "description",
            "start_at",
            "end_at",
            "location",
            "type",
            "created_by",
            "created_at",
        ],
        critical: false,
    },
    TableSpec {
        name: "event_rsvps",
        conflict_target: &["event_id", "user_id"],
        columns: &["id", "event_id", "user_id", "status", "created_at"],
        critical: false,
    },
    TableSpec {
        name: "posts",
        conflict_target: &["id"],
        columns: &["id", "author_id", "title", "content", "created_at"],
        critical: false,
    },
    TableSpec {
        name: "post_comments",
        conflict_target: &["id"],
        columns: &["id", "post_id", "author_id", "content", "created_at"],
        critical: false,
    },
    TableSpec {
        name: "comments",
        conflict_target: &["id"],
        columns: &["id", "person_handle", "author_id", "content", "created_at"],
        critical: false,
    },
    TableSpec {
        name: "media",
        conflict_target: &["id"],
        columns: &[
            "id",
            "file_name",
            "mime_type",
            "file_size",
            "state",
            "uploader_id",
            "storage_path",
            "storage_url",
            "media_type",
            "linked_person",
            "title",
            "description",
            "created_at",
        ],
        critical: false,
    },
];

/// Find the spec for a table by name.
pub fn table_spec(name: &str) -> Option<&'static TableSpec> {
    BACKUP_TABLES.iter().find(|t| t.name == name)
}

/// Read and validate the `exported_at` marker of a backup document.
pub fn require_exported_at(backup: &serde_json::Value) -> Result<String, CoreError> {
    match backup.get("exported_at").and_then(|v| v.as_str()) {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(CoreError::Validation(
            "Tệp sao lưu không hợp lệ: thiếu exported_at".into(),
        )),
    }
}

/// Outcome of restoring one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOutcome {
    pub table: String,
    pub upserted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableOutcome {
    pub fn ok(table: &str, upserted: usize) -> Self {
        Self {
            table: table.to_string(),
            upserted,
            error: None,
        }
    }

    pub fn failed(table: &str, upserted: usize, error: impl Into<String>) -> Self {
        Self {
            table: table.to_string(),
            upserted,
            error: Some(error.into()),
        }
    }
}

/// Summary of a whole restore run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreReport {
    pub ok: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub partial: bool,
    pub aborted: bool,
    pub results: Vec<TableOutcome>,
    pub total_records: usize,
}

impl RestoreReport {
    pub fn from_outcomes(results: Vec<TableOutcome>, aborted: bool) -> Self {
        let failures = results.iter().filter(|r| r.error.is_some()).count();
        let total_records = results.iter().map(|r| r.upserted).sum();
        Self {
            ok: failures == 0 && !aborted,
            partial: failures > 0 && !aborted,
            aborted,
            results,
            total_records,
        }
    }
}
