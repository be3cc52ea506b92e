//! Role and status extractors.
//!
//! Each wraps [`AuthUser`] and rejects with 403 when the profile does not
//! qualify. Every role check also requires an active profile.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use giapha_core::error::CoreError;
use giapha_core::roles::can_moderate;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn active_user(parts: &mut Parts, state: &AppState) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !user.profile.is_active() {
        return Err(CoreError::Forbidden("Tài khoản đang chờ duyệt".into()).into());
    }
    Ok(user)
}

/// Requires an active profile.
pub struct RequireActive(pub AuthUser);

impl FromRequestParts<AppState> for RequireActive {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        active_user(parts, state).await.map(RequireActive)
    }
}

/// Requires an active `admin` or `editor`.
pub struct RequireModerator(pub AuthUser);

impl FromRequestParts<AppState> for RequireModerator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = active_user(parts, state).await?;
        if !can_moderate(&user.profile.role) {
            return Err(CoreError::Forbidden(
                "Chỉ quản trị viên hoặc biên tập viên được thực hiện".into(),
            )
            .into());
        }
        Ok(RequireModerator(user))
    }
}

/// Requires an active `admin`.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = active_user(parts, state).await?;
        if !user.profile.is_admin() {
            return Err(CoreError::Forbidden("Chỉ quản trị viên được thực hiện".into()).into());
        }
        Ok(RequireAdmin(user))
    }
}
