//! Clan events and feed posts.

use giapha_core::clan_event::EventType;
use giapha_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClanEvent {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Option<Timestamp>,
    pub location: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for inserting an event.
#[derive(Debug, Clone)]
pub struct NewClanEvent {
    pub title: String,
    pub description: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Option<Timestamp>,
    pub location: Option<String>,
    pub event_type: EventType,
    pub created_by: Option<DbId>,
}

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub author_id: DbId,
    pub title: Option<String>,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: DbId,
    pub title: Option<String>,
    pub content: String,
}
