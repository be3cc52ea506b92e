//! Profile rows: the application-side view of an identity.

use giapha_core::roles::{PROFILE_STATUS_ACTIVE, ROLE_ADMIN};
use giapha_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table. `id` equals the identity provider's
/// user id.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub display_name: Option<String>,
    pub role: String,
    pub status: String,
    pub created_at: Timestamp,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn is_active(&self) -> bool {
        self.status == PROFILE_STATUS_ACTIVE
    }
}
