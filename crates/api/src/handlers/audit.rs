use axum::extract::State;
use giapha_db::models::audit::AuditLogParams;
use giapha_pipeline::audit::{self, AuditPage};

use crate::error::AppResult;
use crate::extract::{Json, Query};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /audit-logs -- newest first, 20 per page. Admin only.
pub async fn list_audit_logs(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<AuditLogParams>,
) -> AppResult<Json<AuditPage>> {
    Ok(Json(audit::list(state.store.as_ref(), &params).await?))
}
