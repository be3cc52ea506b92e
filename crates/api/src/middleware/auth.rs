//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use giapha_core::error::CoreError;
use giapha_db::models::profile::Profile;
use giapha_pipeline::Actor;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Read the token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CoreError::Unauthorized("Vui lòng đăng nhập".into()))?;
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CoreError::Unauthorized("Sai định dạng Authorization".into()).into())
}

/// The caller, identified by a valid access token, with their profile.
///
/// A token whose subject has no profile row is rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub profile: Profile,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.profile.id,
            email: self.profile.email.clone(),
            role: self.profile.role.clone(),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            CoreError::Unauthorized("Phiên đăng nhập không hợp lệ hoặc đã hết hạn".into())
        })?;

        let profile = state
            .store
            .find_profile(claims.sub)
            .await?
            .ok_or_else(|| CoreError::Unauthorized("Tài khoản chưa có hồ sơ".into()))?;

        Ok(AuthUser { profile })
    }
}
