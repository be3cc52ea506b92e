//! Supabase Storage adapter.
//!
//! Objects are written with the service key, so bucket policies do not
//! apply; callers are responsible for authorization.

use async_trait::async_trait;

use crate::{ObjectStore, StorageError};

/// Default bucket when `STORAGE_BUCKET` is not set.
const DEFAULT_BUCKET: &str = "media";

/// Connection settings for the storage API.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Service-role key sent as bearer token and `apikey`.
    pub service_key: String,
    pub bucket: String,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both `STORAGE_URL` and `STORAGE_SERVICE_KEY`
    /// are set.
    ///
    /// | Variable              | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `STORAGE_URL`         | yes      |         |
    /// | `STORAGE_SERVICE_KEY` | yes      |         |
    /// | `STORAGE_BUCKET`      | no       | `media` |
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("STORAGE_URL").ok()?;
        let service_key = std::env::var("STORAGE_SERVICE_KEY").ok()?;
        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            bucket: std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
        })
    }
}

/// [`ObjectStore`] backed by the Supabase Storage REST API.
pub struct SupabaseStorage {
    config: StorageConfig,
    client: reqwest::Client,
}

impl SupabaseStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url, self.config.bucket, path
        )
    }

    /// Public URL of an object in the bucket.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url, self.config.bucket, path
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StorageError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let size = bytes.len();
        let response = self
            .client
            .post(self.object_url(path))
            .bearer_auth(&self.config.service_key)
            .header("apikey", &self.config.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;
        Self::check(response).await?;

        tracing::debug!(path, size, "Object stored");
        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(format!(
                "{}/storage/v1/object/{}",
                self.config.base_url, self.config.bucket
            ))
            .bearer_auth(&self.config.service_key)
            .header("apikey", &self.config.service_key)
            .json(&serde_json::json!({ "prefixes": [path] }))
            .send()
            .await?;
        Self::check(response).await?;

        tracing::debug!(path, "Object deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> SupabaseStorage {
        SupabaseStorage::new(StorageConfig {
            base_url: "https://demo.supabase.co".into(),
            service_key: "key".into(),
            bucket: "media".into(),
        })
    }

    #[test]
    fn public_url_points_at_public_bucket_path() {
        assert_eq!(
            storage().public_url("u1/2025/03/anh.jpg"),
            "https://demo.supabase.co/storage/v1/object/public/media/u1/2025/03/anh.jpg"
        );
    }

    #[test]
    fn object_url_is_authenticated_path() {
        assert_eq!(
            storage().object_url("a.pdf"),
            "https://demo.supabase.co/storage/v1/object/media/a.pdf"
        );
    }
}
