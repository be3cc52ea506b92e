use axum::routing::get;
use axum::Router;

use crate::handlers::bug_reports;
use crate::state::AppState;

/// ```text
/// POST   /        -> submit_bug_report
/// GET    /        -> list_bug_reports
/// GET    /{id}    -> get_bug_report
/// PATCH  /{id}    -> update_bug_report_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(bug_reports::list_bug_reports).post(bug_reports::submit_bug_report),
        )
        .route(
            "/{id}",
            get(bug_reports::get_bug_report).patch(bug_reports::update_bug_report_status),
        )
}
