use giapha_core::roles::{can_moderate, ROLE_ADMIN};
use giapha_core::types::DbId;

/// The authenticated user on whose behalf a workflow runs.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: DbId,
    pub email: String,
    pub role: String,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Admins and editors.
    pub fn can_moderate(&self) -> bool {
        can_moderate(&self.role)
    }
}
