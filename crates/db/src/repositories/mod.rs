//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. [`PgStore`] wraps a pool and
//! implements the store ports by delegating to them.

pub mod audit_repo;
pub mod backup_repo;
pub mod bug_report_repo;
pub mod content_repo;
pub mod contribution_repo;
pub mod media_repo;
pub mod person_repo;
pub mod pg_store;
pub mod profile_repo;
pub mod question_repo;
pub mod settings_repo;

pub use audit_repo::AuditLogRepo;
pub use backup_repo::BackupRepo;
pub use bug_report_repo::BugReportRepo;
pub use content_repo::ContentRepo;
pub use contribution_repo::ContributionRepo;
pub use media_repo::MediaRepo;
pub use person_repo::PersonRepo;
pub use pg_store::PgStore;
pub use profile_repo::ProfileRepo;
pub use question_repo::QuestionRepo;
pub use settings_repo::SettingsRepo;
