//! Repository for clan events and feed posts.

use sqlx::PgPool;

use crate::models::content::{ClanEvent, NewClanEvent, NewPost, Post};

const EVENT_COLUMNS: &str =
    "id, title, description, start_at, end_at, location, type, created_by, created_at";

const POST_COLUMNS: &str = "id, author_id, title, content, created_at";

pub struct ContentRepo;

impl ContentRepo {
    pub async fn create_event(pool: &PgPool, input: &NewClanEvent) -> Result<ClanEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, description, start_at, end_at, location, type, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, ClanEvent>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_at)
            .bind(input.end_at)
            .bind(&input.location)
            .bind(input.event_type.as_str())
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn create_post(pool: &PgPool, input: &NewPost) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (author_id, title, content) \
             VALUES ($1, $2, $3) \
             RETURNING {POST_COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(input.author_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }
}
