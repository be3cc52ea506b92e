//! Verification of identity-provider access tokens.
//!
//! Tokens are HS256-signed JWTs whose `sub` is the user's uuid, which is
//! also the primary key of their `profiles` row.

use anyhow::{bail, Context};
use giapha_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Audience stamped on user sessions by the identity provider.
const DEFAULT_AUDIENCE: &str = "authenticated";

/// Claims the service reads from an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's id.
    pub sub: DbId,
    pub email: Option<String>,
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    pub audience: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var        | Required | Default         |
    /// |----------------|----------|-----------------|
    /// | `JWT_SECRET`   | **yes**  | --              |
    /// | `JWT_AUDIENCE` | no       | `authenticated` |
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }
        let audience =
            std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.to_string());
        Ok(Self { secret, audience })
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, expiry and audience.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.set_audience(&[config.audience.as_str()]);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// Issue a token the way the identity provider does. Used by tests and
/// local tooling; production tokens come from the provider.
pub fn generate_token(
    user_id: DbId,
    email: Option<&str>,
    ttl: chrono::Duration,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        email: email.map(str::to_string),
        aud: config.audience.clone(),
        exp: now + ttl.num_seconds(),
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}
