//! Workflows composed from the store, object-store and notifier ports.
//!
//! Each module exposes plain async functions taking the ports by reference;
//! the HTTP layer owns the `Arc`s and passes them in.
//!
//! - [`registration`] -- quiz sampling and verification.
//! - [`contributions`] -- submit, list, review and apply.
//! - [`media`] -- quota-gated upload, moderation and soft delete.
//! - [`avatar`] -- assigning a published photo as a person's avatar.
//! - [`backup`] -- full export and ordered, chunked restore.
//! - [`birthday`] -- the daily birthday greeting and reminder job.
//! - [`audit`] -- best-effort audit recording and querying.

pub mod actor;
pub mod audit;
pub mod avatar;
pub mod backup;
pub mod birthday;
pub mod contributions;
pub mod error;
pub mod media;
pub mod registration;

pub use actor::Actor;
pub use error::{PipelineError, PipelineResult};
