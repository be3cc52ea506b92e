//! Repository for the `bug_reports` table.

use giapha_core::bug_report::BugStatus;
use giapha_core::types::DbId;
use sqlx::PgPool;

use crate::models::bug_report::{BugReport, CreateBugReport};

/// Column list for `bug_reports` queries.
const COLUMNS: &str =
    "id, reporter_id, title, description, page_url, status, created_at, updated_at";

pub struct BugReportRepo;

impl BugReportRepo {
    /// Insert a new bug report with status `open`.
    pub async fn create(
        pool: &PgPool,
        reporter_id: DbId,
        input: &CreateBugReport,
    ) -> Result<BugReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO bug_reports (reporter_id, title, description, page_url, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BugReport>(&query)
            .bind(reporter_id)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(&input.page_url)
            .bind(BugStatus::Open.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BugReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bug_reports WHERE id = $1");
        sqlx::query_as::<_, BugReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        status: Option<BugStatus>,
        reporter: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BugReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bug_reports \
             WHERE ($1::TEXT IS NULL OR status = $1) \
               AND ($2::UUID IS NULL OR reporter_id = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, BugReport>(&query)
            .bind(status.map(BugStatus::as_str))
            .bind(reporter)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: BugStatus,
    ) -> Result<Option<BugReport>, sqlx::Error> {
        let query = format!(
            "UPDATE bug_reports SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BugReport>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }
}
