//! Repository for the `audit_logs` table (append-only).

use sqlx::PgPool;

use crate::models::audit::{AuditLog, AuditQuery, NewAuditLog};

/// Column list for `audit_logs` queries.
const COLUMNS: &str =
    "id, actor_id, actor_email, action, entity_type, entity_id, metadata, created_at";

/// Shared filter predicate for list and count.
const FILTER: &str = "($1::TEXT IS NULL OR action = $1) \
    AND ($2::TEXT IS NULL OR entity_type = $2)";

pub struct AuditLogRepo;

impl AuditLogRepo {
    pub async fn create(pool: &PgPool, input: &NewAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs (actor_id, actor_email, action, entity_type, entity_id, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(input.actor_id)
            .bind(&input.actor_email)
            .bind(&input.action)
            .bind(&input.entity_type)
            .bind(&input.entity_id)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    pub async fn query(pool: &PgPool, params: &AuditQuery) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs WHERE {FILTER} \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(&params.action)
            .bind(&params.entity_type)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, params: &AuditQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM audit_logs WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&params.action)
            .bind(&params.entity_type)
            .fetch_one(pool)
            .await
    }
}
