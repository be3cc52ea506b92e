use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::backup;
use crate::state::AppState;

/// Backups carry the whole dataset.
const RESTORE_BODY_LIMIT: usize = 100 * 1024 * 1024;

/// ```text
/// GET   /backup   -> export_backup (admin)
/// POST  /restore  -> restore_backup (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/backup", get(backup::export_backup))
        .route(
            "/restore",
            post(backup::restore_backup).layer(DefaultBodyLimit::max(RESTORE_BODY_LIMIT)),
        )
}
