//! Repository for the `profiles` table.

use giapha_core::roles::{PROFILE_STATUS_ACTIVE, ROLE_ADMIN};
use giapha_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::Profile;

/// Column list for `profiles` queries.
const COLUMNS: &str = "id, email, display_name, role, status, created_at";

/// Provides read access to profiles. Profiles are created by the identity
/// provider's signup hook and managed elsewhere.
pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active profiles, optionally restricted to one role.
    pub async fn list_active(
        pool: &PgPool,
        role: Option<&str>,
    ) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles \
             WHERE status = $1 AND ($2::TEXT IS NULL OR role = $2) \
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(PROFILE_STATUS_ACTIVE)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    pub async fn list_active_admins(pool: &PgPool) -> Result<Vec<Profile>, sqlx::Error> {
        Self::list_active(pool, Some(ROLE_ADMIN)).await
    }
}
