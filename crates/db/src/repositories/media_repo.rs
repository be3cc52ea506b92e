//! Repository for the `media` table.

use giapha_core::media::MediaState;
use giapha_core::types::DbId;
use sqlx::PgPool;

use crate::models::media::{Media, NewMedia};

/// Column list for `media` queries.
const COLUMNS: &str = "\
    id, file_name, mime_type, file_size, state, uploader_id, storage_path, \
    storage_url, media_type, linked_person, title, description, created_at";

pub struct MediaRepo;

impl MediaRepo {
    /// Count an uploader's media whose state is one of `states`.
    pub async fn count_in_states(
        pool: &PgPool,
        uploader_id: DbId,
        states: &[MediaState],
    ) -> Result<i64, sqlx::Error> {
        let states: Vec<&str> = states.iter().map(|s| s.as_str()).collect();
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM media WHERE uploader_id = $1 AND state = ANY($2)",
        )
        .bind(uploader_id)
        .bind(&states)
        .fetch_one(pool)
        .await
    }

    /// Record an upload in the `pending` state.
    pub async fn create(pool: &PgPool, input: &NewMedia) -> Result<Media, sqlx::Error> {
        let query = format!(
            "INSERT INTO media \
                (file_name, mime_type, file_size, state, uploader_id, storage_path, \
                 storage_url, media_type, linked_person, title, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(&input.file_name)
            .bind(&input.mime_type)
            .bind(input.file_size)
            .bind(MediaState::Pending.as_str())
            .bind(input.uploader_id)
            .bind(&input.storage_path)
            .bind(&input.storage_url)
            .bind(input.media_type.as_str())
            .bind(&input.linked_person)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE id = $1");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Conditional state change; `None` when the row is not in `from`.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: MediaState,
        to: MediaState,
    ) -> Result<Option<Media>, sqlx::Error> {
        let query = format!(
            "UPDATE media SET state = $3 WHERE id = $1 AND state = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }
}
