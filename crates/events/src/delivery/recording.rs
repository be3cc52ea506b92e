//! Notifier that keeps every message in memory, for tests.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::notifier::{Notification, Notifier, NotifyError};

#[derive(Default)]
struct Inner {
    sent: Vec<Notification>,
    failing: HashSet<String>,
}

#[derive(Default)]
pub struct RecordingNotifier {
    inner: Mutex<Inner>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make sends to `address` fail.
    pub fn fail_for(&self, address: &str) {
        self.lock().failing.insert(address.to_string());
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.lock().sent.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut inner = self.lock();
        if inner.failing.contains(&notification.to) {
            return Err(NotifyError::Build(format!("refused: {}", notification.to)));
        }
        inner.sent.push(notification.clone());
        Ok(())
    }
}
