pub mod audit;
pub mod backup;
pub mod bug_reports;
pub mod contributions;
pub mod cron;
pub mod health;
pub mod media;
pub mod people;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /questions                         random quiz questions (public)
/// /verify-quiz                       grade quiz answers (public, POST)
/// /me                                caller's profile
///
/// /contributions                     submit (POST), list (GET)
/// /contributions/{id}                review (PATCH, admin)
///
/// /media/upload                      upload (POST, multipart)
/// /media/{id}                        moderate (PATCH), soft delete (DELETE)
///
/// /people/{handle}/set-avatar        set or clear avatar (POST)
///
/// /audit-logs                        audit query (admin)
/// /backup                            export (admin)
/// /restore                           restore (POST, admin)
///
/// /bug-reports                       submit (POST), list (GET)
/// /bug-reports/{id}                  get (GET), update status (PATCH, admin)
///
/// /cron/birthday                     daily birthday job (cron secret)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/questions", get(handlers::quiz::list_questions))
        .route("/verify-quiz", post(handlers::quiz::verify_quiz))
        .route("/me", get(handlers::profile::get_me))
        .nest("/contributions", contributions::router())
        .nest("/media", media::router())
        .nest("/people", people::router())
        .merge(audit::router())
        .merge(backup::router())
        .nest("/bug-reports", bug_reports::router())
        .nest("/cron", cron::router())
}
