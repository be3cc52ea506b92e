//! Audit recording and querying.

use giapha_core::audit::AUDIT_PAGE_SIZE;
use giapha_core::pagination::page_offset;
use giapha_db::models::audit::{AuditLog, AuditLogParams, AuditQuery, NewAuditLog};
use giapha_db::Store;
use serde::Serialize;

use crate::actor::Actor;
use crate::error::PipelineResult;

/// Append an audit entry. Failures are logged and swallowed: an audit write
/// never undoes or fails the action it describes.
pub async fn record(
    store: &dyn Store,
    actor: &Actor,
    action: &str,
    entity_type: &str,
    entity_id: Option<String>,
    metadata: serde_json::Value,
) {
    let entry = NewAuditLog {
        actor_id: Some(actor.id),
        actor_email: Some(actor.email.clone()),
        action: action.to_string(),
        entity_type: entity_type.to_string(),
        entity_id,
        metadata,
    };
    if let Err(e) = store.insert_audit(&entry).await {
        tracing::error!(action, entity_type, error = %e, "Failed to write audit entry");
    }
}

/// One page of audit entries plus the total matching count.
#[derive(Debug, Serialize)]
pub struct AuditPage {
    pub ok: bool,
    pub data: Vec<AuditLog>,
    pub total: i64,
}

/// Newest-first page of `AUDIT_PAGE_SIZE` entries.
pub async fn list(store: &dyn Store, params: &AuditLogParams) -> PipelineResult<AuditPage> {
    let query = AuditQuery {
        action: params.action.clone().filter(|a| !a.is_empty()),
        entity_type: params.entity_type.clone().filter(|t| !t.is_empty()),
        limit: AUDIT_PAGE_SIZE,
        offset: page_offset(params.page, AUDIT_PAGE_SIZE),
    };
    let data = store.query_audit(&query).await?;
    let total = store.count_audit(&query).await?;
    Ok(AuditPage {
        ok: true,
        data,
        total,
    })
}
