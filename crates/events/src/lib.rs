//! Outbound notifications.
//!
//! - [`Notifier`] -- the sender port used by the workflows.
//! - [`delivery`] -- concrete senders: SMTP ([`EmailNotifier`]) and a
//!   logging fallback ([`LogNotifier`]) used when SMTP is not configured.
//! - [`templates`] -- the Vietnamese email bodies.
//! - [`spawn_notifications`] -- fire-and-forget dispatch.

pub mod delivery;
pub mod notifier;
pub mod templates;

pub use delivery::email::{EmailConfig, EmailNotifier};
pub use delivery::log::LogNotifier;
#[cfg(feature = "memory")]
pub use delivery::recording::RecordingNotifier;
pub use notifier::{spawn_notifications, Notification, Notifier, NotifyError};
