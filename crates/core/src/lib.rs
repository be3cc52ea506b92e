//! Domain rules for the Gia Phả family-tree service.
//!
//! Everything in this crate is pure: validation, parsing, status transitions
//! and small calculations shared by the repository, workflow and HTTP layers.
//! No I/O happens here.

pub mod audit;
pub mod birthday;
pub mod bug_report;
pub mod clan_event;
pub mod contribution;
pub mod error;
pub mod handle;
pub mod media;
pub mod pagination;
pub mod person_columns;
pub mod quiz;
pub mod restore;
pub mod roles;
pub mod types;
