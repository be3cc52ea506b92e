use axum::extract::State;
use giapha_core::types::DbId;
use giapha_pipeline::avatar;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::rbac::RequireModerator;
use crate::state::AppState;

/// Body of `POST /people/{handle}/set-avatar`: `{ mediaId }` or `{ clear: true }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAvatarRequest {
    pub media_id: Option<DbId>,
    #[serde(default)]
    pub clear: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAvatarResponse {
    pub ok: bool,
    pub avatar_url: Option<String>,
}

pub async fn set_avatar(
    RequireModerator(user): RequireModerator,
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Json(input): Json<SetAvatarRequest>,
) -> AppResult<Json<SetAvatarResponse>> {
    let media_id = match (input.clear, input.media_id) {
        (true, _) => None,
        (false, Some(id)) => Some(id),
        (false, None) => {
            return Err(AppError::BadRequest("Cần mediaId hoặc clear: true".into()));
        }
    };
    let avatar_url =
        avatar::set_avatar(state.store.as_ref(), &user.actor(), &handle, media_id).await?;
    Ok(Json(SetAvatarResponse {
        ok: true,
        avatar_url,
    }))
}
