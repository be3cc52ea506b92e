use axum::routing::post;
use axum::Router;

use crate::handlers::people;
use crate::state::AppState;

/// ```text
/// POST  /{handle}/set-avatar  -> set_avatar (admin/editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{handle}/set-avatar", post(people::set_avatar))
}
