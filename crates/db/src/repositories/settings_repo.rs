//! Repository for the `app_settings` key/value table.

use sqlx::PgPool;

pub struct SettingsRepo;

impl SettingsRepo {
    /// Insert `key` unless it already exists. Returns `true` when this call
    /// inserted it.
    pub async fn insert_if_absent(
        pool: &PgPool,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO app_settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO NOTHING",
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
