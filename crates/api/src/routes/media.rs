use axum::extract::DefaultBodyLimit;
use axum::routing::{patch, post};
use axum::Router;
use giapha_core::media::MAX_DOCUMENT_BYTES;

use crate::handlers::media;
use crate::state::AppState;

/// Room for multipart framing around the largest allowed file.
const UPLOAD_BODY_LIMIT: usize = MAX_DOCUMENT_BYTES + 1024 * 1024;

/// ```text
/// POST    /upload   -> upload_media
/// PATCH   /{id}     -> moderate_media (admin/editor)
/// DELETE  /{id}     -> delete_media (owner/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(media::upload_media).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/{id}",
            patch(media::moderate_media).delete(media::delete_media),
        )
}
