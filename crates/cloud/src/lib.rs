//! Object storage for uploaded media.
//!
//! - [`ObjectStore`] -- the port the upload workflow depends on.
//! - [`SupabaseStorage`] -- adapter for the Supabase Storage REST API.
//! - `memory` (feature `memory`) -- an in-memory store for tests.

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod supabase;

use async_trait::async_trait;

pub use error::StorageError;
pub use supabase::{StorageConfig, SupabaseStorage};

/// A bucket of opaque objects addressed by path.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` at `path` and return the object's public URL. Fails if
    /// an object already exists at `path`.
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, StorageError>;

    /// Remove the object at `path`.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}
