use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::contributions;
use crate::state::AppState;

/// ```text
/// POST   /        -> submit_contribution (active member)
/// GET    /        -> list_contributions
/// PATCH  /{id}    -> review_contribution (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(contributions::submit_contribution).get(contributions::list_contributions),
        )
        .route("/{id}", patch(contributions::review_contribution))
}
