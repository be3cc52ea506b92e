//! Handlers for media upload, moderation and soft delete.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use giapha_core::types::DbId;
use giapha_db::models::media::{Media, ModerateMedia};
use giapha_pipeline::media::{self, QuotaUsage, UploadRequest};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireModerator;
use crate::response::OkResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub id: DbId,
    pub storage_url: String,
    pub media_type: String,
    pub quota: QuotaUsage,
}

#[derive(Debug, Serialize)]
pub struct ModerateResponse {
    pub ok: bool,
    pub data: Media,
}

/// Collect the `file` part and the optional text fields.
async fn read_upload(mut multipart: Multipart) -> AppResult<UploadRequest> {
    let mut file = None;
    let mut title = None;
    let mut description = None;
    let mut linked_person = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("tep").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;
                file = Some((file_name, mime_type, bytes.to_vec()));
            }
            Some("title") => title = Some(field.text().await?),
            Some("description") => description = Some(field.text().await?),
            Some("linked_person") => linked_person = Some(field.text().await?),
            _ => {}
        }
    }

    let (file_name, mime_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("Thiếu tệp tải lên".into()))?;
    Ok(UploadRequest {
        file_name,
        mime_type,
        bytes,
        linked_person,
        title,
        description,
    })
}

// ---------------------------------------------------------------------------
// POST /media/upload
// ---------------------------------------------------------------------------

pub async fn upload_media(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<impl IntoResponse> {
    let request = read_upload(multipart?).await?;
    let outcome = media::upload(
        state.store.as_ref(),
        state.objects.as_ref(),
        &auth.actor(),
        state.config.media_upload_quota,
        request,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            ok: true,
            id: outcome.media.id,
            storage_url: outcome.media.storage_url,
            media_type: outcome.media.media_type,
            quota: outcome.quota,
        }),
    ))
}

// ---------------------------------------------------------------------------
// PATCH /media/{id}
// ---------------------------------------------------------------------------

pub async fn moderate_media(
    RequireModerator(user): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ModerateMedia>,
) -> AppResult<Json<ModerateResponse>> {
    let data = media::moderate(state.store.as_ref(), &user.actor(), id, input.state).await?;
    Ok(Json(ModerateResponse { ok: true, data }))
}

// ---------------------------------------------------------------------------
// DELETE /media/{id}
// ---------------------------------------------------------------------------

pub async fn delete_media(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OkResponse>> {
    media::delete(state.store.as_ref(), &auth.actor(), id).await?;
    Ok(Json(OkResponse::ok()))
}
