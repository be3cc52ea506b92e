use anyhow::{bail, Context};
use giapha_core::media::DEFAULT_UPLOAD_QUOTA;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Verification settings for identity-provider access tokens.
    pub jwt: JwtConfig,
    /// Shared secret the scheduler presents to `/api/cron/*`.
    pub cron_secret: String,
    /// Live uploads allowed per user (default: `5`).
    pub media_upload_quota: i64,
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(name, default)
        .parse()
        .with_context(|| format!("{name} is not valid"))
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `CRON_SECRET`          | required                |
    /// | `MEDIA_UPLOAD_QUOTA`   | `5`                     |
    ///
    /// See [`JwtConfig::from_env`] for the token settings.
    pub fn from_env() -> anyhow::Result<Self> {
        let cors_origins = var_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let cron_secret = std::env::var("CRON_SECRET").context("CRON_SECRET must be set")?;
        if cron_secret.trim().is_empty() {
            bail!("CRON_SECRET must not be empty");
        }

        let media_upload_quota: i64 =
            parse_var("MEDIA_UPLOAD_QUOTA", &DEFAULT_UPLOAD_QUOTA.to_string())?;
        if media_upload_quota < 1 {
            bail!("MEDIA_UPLOAD_QUOTA must be at least 1");
        }

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", "3000")?,
            cors_origins,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "30")?,
            jwt: JwtConfig::from_env()?,
            cron_secret,
            media_upload_quota,
        })
    }
}
