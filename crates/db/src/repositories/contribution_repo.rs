//! Repository for the `contributions` table.

use giapha_core::contribution::ContributionStatus;
use giapha_core::types::DbId;
use sqlx::PgPool;

use crate::models::contribution::{Contribution, ContributionFilter, NewContribution};

/// Column list for `contributions` queries.
const COLUMNS: &str = "\
    id, author_id, author_email, field_name, field_label, person_name, \
    person_handle, new_value, status, review_note, created_at, reviewed_by, reviewed_at";

pub struct ContributionRepo;

impl ContributionRepo {
    /// Insert a new `pending` contribution.
    pub async fn create(
        pool: &PgPool,
        input: &NewContribution,
    ) -> Result<Contribution, sqlx::Error> {
        let query = format!(
            "INSERT INTO contributions \
                (author_id, author_email, field_name, field_label, \
                 person_name, person_handle, new_value, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(input.author_id)
            .bind(&input.author_email)
            .bind(input.field_name.as_str())
            .bind(&input.field_label)
            .bind(&input.person_name)
            .bind(&input.person_handle)
            .bind(&input.new_value)
            .bind(ContributionStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contribution>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contributions WHERE id = $1");
        sqlx::query_as::<_, Contribution>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List newest-first with optional status and author filters.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &ContributionFilter,
    ) -> Result<Vec<Contribution>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contributions \
             WHERE ($1::TEXT IS NULL OR status = $1) \
               AND ($2::UUID IS NULL OR author_id = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(filter.status.map(ContributionStatus::as_str))
            .bind(filter.author_id)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Conditional status update. The `WHERE status = $from` predicate makes
    /// this a single-row compare-and-set: of two concurrent callers at most
    /// one gets a row back.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: ContributionStatus,
        to: ContributionStatus,
        reviewer: Option<DbId>,
        review_note: Option<&str>,
    ) -> Result<Option<Contribution>, sqlx::Error> {
        let query = format!(
            "UPDATE contributions SET \
                status = $3, \
                reviewed_by = CASE WHEN $3 = 'pending' THEN NULL ELSE $4 END, \
                reviewed_at = CASE WHEN $3 = 'pending' THEN NULL ELSE NOW() END, \
                review_note = CASE WHEN $3 = 'pending' THEN review_note ELSE $5 END \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(reviewer)
            .bind(review_note)
            .fetch_optional(pool)
            .await
    }
}
