//! Media rows and DTOs.

use giapha_core::error::CoreError;
use giapha_core::media::{MediaState, MediaType};
use giapha_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    pub id: DbId,
    pub file_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub state: String,
    pub uploader_id: DbId,
    pub storage_path: String,
    pub storage_url: String,
    pub media_type: String,
    pub linked_person: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

impl Media {
    pub fn state(&self) -> Result<MediaState, CoreError> {
        self.state.parse()
    }

    pub fn kind(&self) -> Result<MediaType, CoreError> {
        self.media_type.parse()
    }
}

/// DTO for recording an upload that has already been stored.
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub file_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub uploader_id: DbId,
    pub storage_path: String,
    pub storage_url: String,
    pub media_type: MediaType,
    pub linked_person: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Request body for `PATCH /media/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerateMedia {
    pub state: MediaState,
}
