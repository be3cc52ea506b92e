//! Concrete [`Notifier`](crate::Notifier) implementations.

pub mod email;
pub mod log;
#[cfg(feature = "memory")]
pub mod recording;
