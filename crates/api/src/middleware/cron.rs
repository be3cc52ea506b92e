//! Authentication for externally scheduled jobs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use giapha_core::error::CoreError;

use super::auth::bearer_token;
use crate::error::AppError;
use crate::state::AppState;

/// A request carrying `Authorization: Bearer <CRON_SECRET>`.
pub struct CronCaller;

impl FromRequestParts<AppState> for CronCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        if !secrets_match(token.as_bytes(), state.config.cron_secret.as_bytes()) {
            tracing::warn!("Cron call with wrong secret");
            return Err(CoreError::Unauthorized("Sai mã xác thực cron".into()).into());
        }
        Ok(CronCaller)
    }
}

/// Byte comparison whose running time depends only on the lengths.
fn secrets_match(given: &[u8], expected: &[u8]) -> bool {
    if given.len() != expected.len() {
        return false;
    }
    given
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_secrets_match() {
        assert!(secrets_match(b"cron-secret", b"cron-secret"));
    }

    #[test]
    fn differing_byte_is_rejected() {
        assert!(!secrets_match(b"cron-secreT", b"cron-secret"));
        assert!(!secrets_match(b"Cron-secret", b"cron-secret"));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert!(!secrets_match(b"cron", b"cron-secret"));
        assert!(!secrets_match(b"", b"cron-secret"));
    }
}
