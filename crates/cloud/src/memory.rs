//! In-memory [`ObjectStore`] for tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{ObjectStore, StorageError};

#[derive(Default)]
struct Inner {
    objects: HashMap<String, (Vec<u8>, String)>,
    deleted: Vec<String>,
    fail_put: bool,
    fail_delete: bool,
}

/// Keeps objects in a map and records deletions.
#[derive(Default)]
pub struct MemoryObjectStore {
    inner: Mutex<Inner>,
}

impl MemoryObjectStore {
    pub const BASE_URL: &'static str = "https://storage.test/media";

    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fail_puts(&self, fail: bool) {
        self.lock().fail_put = fail;
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.lock().fail_delete = fail;
    }

    pub fn contains(&self, path: &str) -> bool {
        self.lock().objects.contains_key(path)
    }

    pub fn object_count(&self) -> usize {
        self.lock().objects.len()
    }

    /// Paths removed through [`ObjectStore::delete`], in order.
    pub fn deleted(&self) -> Vec<String> {
        self.lock().deleted.clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let mut inner = self.lock();
        if inner.fail_put {
            return Err(StorageError::Backend("injected put failure".into()));
        }
        if inner.objects.contains_key(path) {
            return Err(StorageError::Api {
                status: 409,
                body: "The resource already exists".into(),
            });
        }
        inner
            .objects
            .insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(format!("{}/{path}", Self::BASE_URL))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if inner.fail_delete {
            return Err(StorageError::Backend("injected delete failure".into()));
        }
        inner.objects.remove(path);
        inner.deleted.push(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_delete() {
        let store = MemoryObjectStore::new();
        let url = store.put("a/b.png", vec![1, 2], "image/png").await.unwrap();
        assert_eq!(url, "https://storage.test/media/a/b.png");
        assert!(store.contains("a/b.png"));

        store.delete("a/b.png").await.unwrap();
        assert!(!store.contains("a/b.png"));
        assert_eq!(store.deleted(), vec!["a/b.png".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_path_is_rejected() {
        let store = MemoryObjectStore::new();
        store.put("x", vec![], "image/png").await.unwrap();
        assert!(store.put("x", vec![], "image/png").await.is_err());
    }
}
