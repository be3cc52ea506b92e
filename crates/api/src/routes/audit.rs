use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// ```text
/// GET  /audit-logs  -> list_audit_logs (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/audit-logs", get(audit::list_audit_logs))
}
