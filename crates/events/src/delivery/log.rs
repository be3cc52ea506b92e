use async_trait::async_trait;

use crate::notifier::{Notification, Notifier, NotifyError};

/// Writes notifications to the log instead of sending them. Used when no
/// SMTP server is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            "Email delivery disabled; notification logged only",
        );
        Ok(())
    }
}
