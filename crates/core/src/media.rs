//! Media upload rules: MIME allowlist, size limits, quota, moderation states,
//! and the avatar eligibility check.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::handle::slugify;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Default number of live (pending + published) uploads per user.
pub const DEFAULT_UPLOAD_QUOTA: i64 = 5;

/// Maximum image size in bytes (10 MB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Maximum document size in bytes (50 MB).
pub const MAX_DOCUMENT_BYTES: usize = 50 * 1024 * 1024;

pub const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];
pub const DOCUMENT_MIME_TYPES: &[&str] = &["application/pdf"];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaState {
    Pending,
    Published,
    Rejected,
    Deleted,
}

/// States that count against a user's upload quota.
pub const QUOTA_STATES: &[MediaState] = &[MediaState::Pending, MediaState::Published];

impl MediaState {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaState::Pending => "PENDING",
            MediaState::Published => "PUBLISHED",
            MediaState::Rejected => "REJECTED",
            MediaState::Deleted => "DELETED",
        }
    }
}

impl FromStr for MediaState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(MediaState::Pending),
            "PUBLISHED" => Ok(MediaState::Published),
            "REJECTED" => Ok(MediaState::Rejected),
            "DELETED" => Ok(MediaState::Deleted),
            other => Err(CoreError::Validation(format!(
                "Trạng thái tệp không hợp lệ: '{other}'"
            ))),
        }
    }
}

impl fmt::Display for MediaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    Document,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "IMAGE",
            MediaType::Document => "DOCUMENT",
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            MediaType::Image => MAX_IMAGE_BYTES,
            MediaType::Document => MAX_DOCUMENT_BYTES,
        }
    }
}

impl FromStr for MediaType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IMAGE" => Ok(MediaType::Image),
            "DOCUMENT" => Ok(MediaType::Document),
            other => Err(CoreError::Validation(format!(
                "Loại tệp không hợp lệ: '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Upload validation
// ---------------------------------------------------------------------------

/// Classify a MIME type, rejecting anything outside the allowlist.
pub fn classify_mime(mime: &str) -> Result<MediaType, CoreError> {
    let mime = mime.trim().to_ascii_lowercase();
    if IMAGE_MIME_TYPES.contains(&mime.as_str()) {
        Ok(MediaType::Image)
    } else if DOCUMENT_MIME_TYPES.contains(&mime.as_str()) {
        Ok(MediaType::Document)
    } else {
        Err(CoreError::Validation(format!(
            "Định dạng tệp không được hỗ trợ: '{mime}'. Chỉ chấp nhận JPEG, PNG, WebP, GIF và PDF"
        )))
    }
}

/// Validate MIME type and size together, returning the media type.
pub fn validate_upload(mime: &str, size: usize) -> Result<MediaType, CoreError> {
    let media_type = classify_mime(mime)?;
    if size == 0 {
        return Err(CoreError::Validation("Tệp tải lên rỗng".into()));
    }
    if size > media_type.max_bytes() {
        let limit_mb = media_type.max_bytes() / (1024 * 1024);
        return Err(CoreError::Validation(format!(
            "Tệp vượt quá dung lượng cho phép ({limit_mb}MB)"
        )));
    }
    Ok(media_type)
}

/// Reject the upload when the user already has `used >= limit` live uploads.
pub fn check_quota(used: i64, limit: i64) -> Result<(), CoreError> {
    if used >= limit {
        Err(CoreError::Conflict(format!(
            "Bạn đã đạt giới hạn {limit} tệp đang chờ duyệt hoặc đã đăng"
        )))
    } else {
        Ok(())
    }
}

/// Object-store path for a new upload: `<uploader>/<millis>-<slug>.<ext>`.
pub fn storage_path(uploader_id: DbId, now: Timestamp, file_name: &str) -> String {
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };
    let mut slug = slugify(stem);
    if slug.is_empty() {
        slug.push_str("tep");
    }
    let ext = ext
        .map(|e| e.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();
    format!("{uploader_id}/{}-{slug}{ext}", now.timestamp_millis())
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// Moderators may publish or reject a pending item, or take a published one
/// down again.
pub fn validate_moderation(from: MediaState, to: MediaState) -> Result<(), CoreError> {
    let allowed = matches!(
        (from, to),
        (MediaState::Pending, MediaState::Published)
            | (MediaState::Pending, MediaState::Rejected)
            | (MediaState::Published, MediaState::Rejected)
    );
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Không thể chuyển trạng thái tệp từ {from} sang {to}"
        )))
    }
}

/// A media item may become `handle`'s avatar only if it is a published image
/// linked to that same person.
pub fn check_avatar_candidate(
    state: MediaState,
    media_type: MediaType,
    linked_person: Option<&str>,
    handle: &str,
) -> Result<(), CoreError> {
    if state != MediaState::Published {
        return Err(CoreError::Validation("Ảnh chưa được duyệt".into()));
    }
    if media_type != MediaType::Image {
        return Err(CoreError::Validation("Tệp không phải là ảnh".into()));
    }
    if linked_person != Some(handle) {
        return Err(CoreError::Validation(
            "Ảnh không được gắn với thành viên này".into(),
        ));
    }
    Ok(())
}
