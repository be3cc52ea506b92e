//! Row models and DTOs, one module per table family.

pub mod audit;
pub mod bug_report;
pub mod content;
pub mod contribution;
pub mod media;
pub mod person;
pub mod profile;
pub mod question;
