//! Bug report rows and DTOs.

use giapha_core::bug_report::BugStatus;
use giapha_core::error::CoreError;
use giapha_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bug_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BugReport {
    pub id: DbId,
    pub reporter_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Page the reporter was on.
    pub page_url: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BugReport {
    pub fn status(&self) -> Result<BugStatus, CoreError> {
        self.status.parse()
    }
}

/// Request body for `POST /bug-reports`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBugReport {
    pub title: String,
    pub description: Option<String>,
    pub page_url: Option<String>,
}

/// Request body for `PATCH /bug-reports/{id}`. Parsed by the handler so an
/// unknown status is a validation error.
#[derive(Debug, Deserialize)]
pub struct UpdateBugReportStatus {
    pub status: String,
}

/// Query parameters for `GET /bug-reports`.
#[derive(Debug, Deserialize)]
pub struct BugReportListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
