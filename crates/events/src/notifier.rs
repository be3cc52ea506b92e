//! The notification port and fire-and-forget dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// One plain-text message to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Sends notifications to people.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Send every notification on a background task. Failures are logged and
/// never reach the caller.
pub fn spawn_notifications(
    notifier: Arc<dyn Notifier>,
    notifications: Vec<Notification>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        for notification in notifications {
            if let Err(e) = notifier.send(&notification).await {
                tracing::warn!(
                    to = %notification.to,
                    subject = %notification.subject,
                    error = %e,
                    "Notification delivery failed",
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Flaky {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for Flaky {
        async fn send(&self, n: &Notification) -> Result<(), NotifyError> {
            if n.to.starts_with("bad") {
                return Err(NotifyError::Build("refused".into()));
            }
            self.sent.lock().unwrap().push(n.to.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn spawned_dispatch_continues_past_failures() {
        let notifier = Arc::new(Flaky {
            sent: Mutex::new(Vec::new()),
        });
        spawn_notifications(
            notifier.clone(),
            vec![
                Notification::new("bad@x", "s", "b"),
                Notification::new("good@x", "s", "b"),
            ],
        )
        .await
        .unwrap();
        assert_eq!(*notifier.sent.lock().unwrap(), vec!["good@x".to_string()]);
    }

    #[test]
    fn build_error_display() {
        let err = NotifyError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
