//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- verifies the bearer token and loads the profile.
//! - [`rbac::RequireActive`] -- the profile has been approved.
//! - [`rbac::RequireModerator`] -- active admin or editor.
//! - [`rbac::RequireAdmin`] -- active admin.
//! - [`cron::CronCaller`] -- the scheduler's shared secret.

pub mod auth;
pub mod cron;
pub mod rbac;
