//! Audit log models. Audit rows are append-only.

use giapha_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `audit_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub actor_id: Option<DbId>,
    pub actor_email: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending an audit entry.
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub actor_id: Option<DbId>,
    pub actor_email: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub metadata: serde_json::Value,
}

/// Filter for querying audit logs.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Query parameters for `GET /audit-logs`.
#[derive(Debug, Deserialize)]
pub struct AuditLogParams {
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub page: Option<i64>,
}
