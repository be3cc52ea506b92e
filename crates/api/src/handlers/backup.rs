//! Handlers for full-dataset backup and restore. Admin only.

use axum::extract::State;
use giapha_core::restore::RestoreReport;
use giapha_pipeline::backup;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /backup
pub async fn export_backup(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let document = backup::export(state.store.as_ref()).await?;
    tracing::info!(user_id = %admin.profile.id, "Backup downloaded");
    Ok(Json(document))
}

/// POST /restore -- body is a document produced by [`export_backup`].
///
/// Per-table failures are reported in the body, not as an error status.
pub async fn restore_backup(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(document): Json<Value>,
) -> AppResult<Json<RestoreReport>> {
    let report = backup::restore(state.store.as_ref(), &admin.actor(), &document).await?;
    Ok(Json(report))
}
