//! Email delivery via SMTP.
//!
//! [`EmailNotifier`] wraps the `lettre` async SMTP transport. Configuration
//! is loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and the caller falls back to
//! [`LogNotifier`](super::log::LogNotifier).

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::notifier::{Notification, Notifier, NotifyError};

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "Gia Phả <noreply@giapha.local>";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" mailbox.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default                        |
    /// |-----------------|----------|--------------------------------|
    /// | `SMTP_HOST`     | yes      |                                |
    /// | `SMTP_PORT`     | no       | `587`                          |
    /// | `SMTP_FROM`     | no       | `Gia Phả <noreply@giapha.local>` |
    /// | `SMTP_USER`     | no       |                                |
    /// | `SMTP_PASSWORD` | no       |                                |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Sends notifications as plain-text emails.
pub struct EmailNotifier {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailNotifier {
    /// Build the notifier and its SMTP transport.
    pub fn new(config: EmailConfig) -> Result<Self, NotifyError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    fn build_message(&self, notification: &Notification) -> Result<Message, NotifyError> {
        Message::builder()
            .from(self.config.from_address.parse()?)
            .to(notification.to.parse()?)
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| NotifyError::Build(e.to_string()))
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let message = self.build_message(notification)?;
        self.transport.send(message).await?;

        tracing::info!(to = %notification.to, subject = %notification.subject, "Email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: DEFAULT_SMTP_PORT,
            from_address: DEFAULT_FROM_ADDRESS.into(),
            smtp_user: None,
            smtp_password: None,
        }
    }

    #[tokio::test]
    async fn invalid_recipient_is_an_address_error() {
        let notifier = EmailNotifier::new(config()).unwrap();
        let err = notifier
            .build_message(&Notification::new("not-an-email", "s", "b"))
            .unwrap_err();
        assert!(matches!(err, NotifyError::Address(_)));
    }

    #[tokio::test]
    async fn message_builds_for_valid_addresses() {
        let notifier = EmailNotifier::new(config()).unwrap();
        assert!(notifier
            .build_message(&Notification::new("a@example.com", "Chúc mừng", "Nội dung"))
            .is_ok());
    }
}
