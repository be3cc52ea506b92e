use axum::routing::get;
use axum::Router;

use crate::handlers::cron;
use crate::state::AppState;

/// ```text
/// GET  /birthday  -> run_birthday_job (cron secret)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/birthday", get(cron::run_birthday_job))
}
