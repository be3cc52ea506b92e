//! Avatar assignment.

use giapha_core::audit::{ACTION_CLEAR_AVATAR, ACTION_SET_AVATAR, ENTITY_PERSON};
use giapha_core::error::CoreError;
use giapha_core::media::check_avatar_candidate;
use giapha_core::types::DbId;
use giapha_db::Store;

use crate::actor::Actor;
use crate::audit;
use crate::error::PipelineResult;

/// Set `handle`'s avatar to a published image linked to them, or clear it
/// when `media_id` is `None`. Returns the new avatar URL.
pub async fn set_avatar(
    store: &dyn Store,
    actor: &Actor,
    handle: &str,
    media_id: Option<DbId>,
) -> PipelineResult<Option<String>> {
    if !actor.can_moderate() {
        return Err(CoreError::Forbidden("Bạn không có quyền đổi ảnh đại diện".into()).into());
    }
    if store.find_person(handle).await?.is_none() {
        return Err(CoreError::not_found("Person", handle).into());
    }

    let url = match media_id {
        Some(id) => {
            let media = store
                .find_media(id)
                .await?
                .ok_or_else(|| CoreError::not_found("Media", id))?;
            check_avatar_candidate(
                media.state()?,
                media.kind()?,
                media.linked_person.as_deref(),
                handle,
            )?;
            Some(media.storage_url)
        }
        None => None,
    };

    if !store.set_avatar_url(handle, url.as_deref()).await? {
        return Err(CoreError::not_found("Person", handle).into());
    }

    let action = if url.is_some() {
        ACTION_SET_AVATAR
    } else {
        ACTION_CLEAR_AVATAR
    };
    audit::record(
        store,
        actor,
        action,
        ENTITY_PERSON,
        Some(handle.to_string()),
        serde_json::json!({ "media_id": media_id, "avatar_url": url }),
    )
    .await;
    tracing::info!(handle, media_id = ?media_id, "Avatar updated");
    Ok(url)
}
