//! Media upload gate, moderation and soft delete.
//!
//! An upload is a two-step saga: the bytes go to the object store first and
//! the row is recorded second. If recording fails the stored object is
//! deleted again.

use chrono::Utc;
use giapha_cloud::ObjectStore;
use giapha_core::audit::{ACTION_MEDIA_DELETED, ACTION_MEDIA_MODERATED, ENTITY_MEDIA};
use giapha_core::error::CoreError;
use giapha_core::media::{
    check_quota, storage_path, validate_moderation, validate_upload, MediaState, QUOTA_STATES,
};
use giapha_core::types::DbId;
use giapha_db::models::media::{Media, NewMedia};
use giapha_db::Store;
use serde::Serialize;

use crate::actor::Actor;
use crate::audit;
use crate::error::PipelineResult;

/// A file received from the client.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub linked_person: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Uploads counted against the quota, after this upload.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuotaUsage {
    pub used: i64,
    pub limit: i64,
}

#[derive(Debug)]
pub struct UploadOutcome {
    pub media: Media,
    pub quota: QuotaUsage,
}

/// Validate, store and record an upload for `uploader`.
pub async fn upload(
    store: &dyn Store,
    objects: &dyn ObjectStore,
    uploader: &Actor,
    quota: i64,
    request: UploadRequest,
) -> PipelineResult<UploadOutcome> {
    if request.bytes.is_empty() {
        return Err(CoreError::Validation("Tệp rỗng".into()).into());
    }
    let mime_type = request.mime_type.trim().to_ascii_lowercase();
    let media_type = validate_upload(&mime_type, request.bytes.len())?;

    let linked_person = request
        .linked_person
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty());
    if let Some(handle) = &linked_person {
        if store.find_person(handle).await?.is_none() {
            return Err(CoreError::not_found("Person", handle).into());
        }
    }

    let used = store.count_media_in_states(uploader.id, QUOTA_STATES).await?;
    check_quota(used, quota)?;

    let path = storage_path(uploader.id, Utc::now(), &request.file_name);
    let file_size = request.bytes.len() as i64;
    let storage_url = objects.put(&path, request.bytes, &mime_type).await?;

    let record = NewMedia {
        file_name: request.file_name,
        mime_type,
        file_size,
        uploader_id: uploader.id,
        storage_path: path.clone(),
        storage_url,
        media_type,
        linked_person,
        title: request.title.filter(|t| !t.trim().is_empty()),
        description: request.description.filter(|d| !d.trim().is_empty()),
    };

    let media = match store.insert_media(&record).await {
        Ok(media) => media,
        Err(e) => {
            tracing::error!(user_id = %uploader.id, path = %path, error = %e, "Recording upload failed; removing object");
            if let Err(cleanup) = objects.delete(&path).await {
                tracing::error!(path = %path, error = %cleanup, "Orphaned object left in storage");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        media_id = %media.id,
        user_id = %uploader.id,
        media_type = %media.media_type,
        size = file_size,
        "Media uploaded",
    );

    Ok(UploadOutcome {
        media,
        quota: QuotaUsage {
            used: used + 1,
            limit: quota,
        },
    })
}

async fn find_media(store: &dyn Store, id: DbId) -> PipelineResult<Media> {
    Ok(store
        .find_media(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Media", id))?)
}

/// Move a media item to `PUBLISHED` or `REJECTED`. Admins and editors only.
pub async fn moderate(
    store: &dyn Store,
    actor: &Actor,
    id: DbId,
    to: MediaState,
) -> PipelineResult<Media> {
    if !actor.can_moderate() {
        return Err(CoreError::Forbidden("Chỉ quản trị viên hoặc biên tập viên được duyệt tệp".into()).into());
    }
    let media = find_media(store, id).await?;
    let from = media.state()?;
    validate_moderation(from, to)?;

    let updated = store
        .transition_media(id, from, to)
        .await?
        .ok_or_else(|| CoreError::Conflict("Trạng thái tệp vừa bị thay đổi".into()))?;

    audit::record(
        store,
        actor,
        ACTION_MEDIA_MODERATED,
        ENTITY_MEDIA,
        Some(id.to_string()),
        serde_json::json!({ "from": from.as_str(), "to": to.as_str() }),
    )
    .await;
    tracing::info!(media_id = %id, from = %from, to = %to, "Media moderated");
    Ok(updated)
}

/// Soft-delete a media item. Owner or admin only.
pub async fn delete(store: &dyn Store, actor: &Actor, id: DbId) -> PipelineResult<()> {
    let media = find_media(store, id).await?;
    if media.uploader_id != actor.id && !actor.is_admin() {
        return Err(CoreError::Forbidden("Bạn không có quyền xoá tệp này".into()).into());
    }
    let from = media.state()?;
    if from == MediaState::Deleted {
        return Err(CoreError::not_found("Media", id).into());
    }

    store
        .transition_media(id, from, MediaState::Deleted)
        .await?
        .ok_or_else(|| CoreError::Conflict("Trạng thái tệp vừa bị thay đổi".into()))?;

    audit::record(
        store,
        actor,
        ACTION_MEDIA_DELETED,
        ENTITY_MEDIA,
        Some(id.to_string()),
        serde_json::json!({ "from": from.as_str() }),
    )
    .await;
    tracing::info!(media_id = %id, user_id = %actor.id, "Media deleted");
    Ok(())
}
