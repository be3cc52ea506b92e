//! Audit action and entity names.

pub const ACTION_CONTRIBUTION_APPROVED: &str = "contribution.approved";
pub const ACTION_CONTRIBUTION_REJECTED: &str = "contribution.rejected";
pub const ACTION_RESTORE: &str = "backup.restore";
pub const ACTION_SET_AVATAR: &str = "person.set_avatar";
pub const ACTION_CLEAR_AVATAR: &str = "person.clear_avatar";
pub const ACTION_MEDIA_MODERATED: &str = "media.moderated";
pub const ACTION_MEDIA_DELETED: &str = "media.deleted";

pub const ENTITY_CONTRIBUTION: &str = "contribution";
pub const ENTITY_BACKUP: &str = "backup";
pub const ENTITY_PERSON: &str = "person";
pub const ENTITY_MEDIA: &str = "media";

/// Audit log rows per page.
pub const AUDIT_PAGE_SIZE: i64 = 20;
