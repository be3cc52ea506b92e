//! Well-known role and profile status constants.
//!
//! These must match the check constraints on the `profiles` table.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_MEMBER: &str = "member";

pub const PROFILE_STATUS_PENDING: &str = "pending";
pub const PROFILE_STATUS_ACTIVE: &str = "active";

/// Roles allowed to moderate media and assign avatars.
pub fn can_moderate(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}
