//! Store ports.
//!
//! The workflow layer talks to persistence only through these traits, so the
//! Postgres adapter ([`crate::PgStore`]) and the in-memory fake used in tests
//! are interchangeable. Every method is a single logical request; none of
//! them spans a multi-statement transaction.

use async_trait::async_trait;
use giapha_core::bug_report::BugStatus;
use giapha_core::contribution::ContributionStatus;
use giapha_core::media::MediaState;
use giapha_core::person_columns::PersonFieldValue;
use giapha_core::restore::TableSpec;
use giapha_core::types::DbId;

use crate::error::StoreResult;
use crate::models::audit::{AuditLog, AuditQuery, NewAuditLog};
use crate::models::bug_report::{BugReport, CreateBugReport};
use crate::models::content::{ClanEvent, NewClanEvent, NewPost, Post};
use crate::models::contribution::{Contribution, ContributionFilter, NewContribution};
use crate::models::media::{Media, NewMedia};
use crate::models::person::{Family, NewFamily, NewPerson, Person};
use crate::models::profile::Profile;
use crate::models::question::{NewQuestion, PublicQuestion, QuestionAnswer};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_profile(&self, id: DbId) -> StoreResult<Option<Profile>>;

    /// Active profiles with the `admin` role.
    async fn list_active_admins(&self) -> StoreResult<Vec<Profile>>;

    /// All active profiles.
    async fn list_active_profiles(&self) -> StoreResult<Vec<Profile>>;
}

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Public projection (`id`, `question`, `hint`) of every active question.
    async fn list_active_questions(&self) -> StoreResult<Vec<PublicQuestion>>;

    /// Answer key for those of `ids` that exist and are active.
    async fn find_active_answers(&self, ids: &[DbId]) -> StoreResult<Vec<QuestionAnswer>>;

    /// Insert an active question, returning its id.
    async fn insert_question(&self, input: &NewQuestion) -> StoreResult<DbId>;
}

#[async_trait]
pub trait ContributionStore: Send + Sync {
    async fn insert_contribution(&self, input: &NewContribution) -> StoreResult<Contribution>;

    async fn find_contribution(&self, id: DbId) -> StoreResult<Option<Contribution>>;

    async fn list_contributions(&self, filter: &ContributionFilter)
        -> StoreResult<Vec<Contribution>>;

    /// Compare-and-set the status: moves `id` from `from` to `to` only if it
    /// is currently `from`. Returns the updated row, or `None` when the row
    /// does not exist or is in another state.
    ///
    /// Moving to `pending` clears the reviewer fields; any other target
    /// stamps `reviewed_by`/`reviewed_at`.
    async fn transition_contribution(
        &self,
        id: DbId,
        from: ContributionStatus,
        to: ContributionStatus,
        reviewer: Option<DbId>,
        review_note: Option<&str>,
    ) -> StoreResult<Option<Contribution>>;
}

#[async_trait]
pub trait PeopleStore: Send + Sync {
    /// Insert a person. A duplicate handle yields `StoreError::Conflict`.
    async fn insert_person(&self, input: &NewPerson) -> StoreResult<Person>;

    async fn find_person(&self, handle: &str) -> StoreResult<Option<Person>>;

    /// Set one whitelisted column (plus `updated_at`) on the person with
    /// `handle`. Returns whether a row was updated.
    async fn update_person_field(
        &self,
        handle: &str,
        column: &str,
        value: &PersonFieldValue,
    ) -> StoreResult<bool>;

    /// Set or clear `avatar_url`. Returns whether a row was updated.
    async fn set_avatar_url(&self, handle: &str, url: Option<&str>) -> StoreResult<bool>;

    async fn insert_family(&self, input: &NewFamily) -> StoreResult<Family>;

    /// Living people with a known birth month and day.
    async fn list_living_with_birthdays(&self) -> StoreResult<Vec<Person>>;
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn insert_event(&self, input: &NewClanEvent) -> StoreResult<ClanEvent>;

    async fn insert_post(&self, input: &NewPost) -> StoreResult<Post>;
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Count `uploader`'s media whose state is one of `states`.
    async fn count_media_in_states(&self, uploader: DbId, states: &[MediaState])
        -> StoreResult<i64>;

    async fn insert_media(&self, input: &NewMedia) -> StoreResult<Media>;

    async fn find_media(&self, id: DbId) -> StoreResult<Option<Media>>;

    /// Compare-and-set the media state; `None` if `id` is not in `from`.
    async fn transition_media(
        &self,
        id: DbId,
        from: MediaState,
        to: MediaState,
    ) -> StoreResult<Option<Media>>;
}

#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn insert_audit(&self, input: &NewAuditLog) -> StoreResult<AuditLog>;

    /// Newest-first page of entries matching `query`.
    async fn query_audit(&self, query: &AuditQuery) -> StoreResult<Vec<AuditLog>>;

    /// Number of entries matching `query` (ignores limit/offset).
    async fn count_audit(&self, query: &AuditQuery) -> StoreResult<i64>;
}

#[async_trait]
pub trait BugReportStore: Send + Sync {
    async fn create_bug_report(
        &self,
        reporter: DbId,
        input: &CreateBugReport,
    ) -> StoreResult<BugReport>;

    async fn find_bug_report(&self, id: DbId) -> StoreResult<Option<BugReport>>;

    /// Newest first; `reporter` restricts to one user's reports.
    async fn list_bug_reports(
        &self,
        status: Option<BugStatus>,
        reporter: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<BugReport>>;

    async fn update_bug_report_status(
        &self,
        id: DbId,
        status: BugStatus,
    ) -> StoreResult<Option<BugReport>>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Insert `key` if absent. Returns `true` when this call created it,
    /// `false` when it already existed.
    async fn claim_setting(&self, key: &str, value: &serde_json::Value) -> StoreResult<bool>;
}

#[async_trait]
pub trait BackupStore: Send + Sync {
    /// Every row of `table` as a JSON object restricted to `table.columns`.
    async fn export_table(&self, table: &TableSpec) -> StoreResult<Vec<serde_json::Value>>;

    /// Upsert one chunk of rows on `table.conflict_target`. Returns the
    /// number of rows written.
    async fn upsert_rows(&self, table: &TableSpec, rows: &[serde_json::Value])
        -> StoreResult<usize>;
}

/// Every port at once; what the application state holds.
pub trait Store:
    ProfileStore
    + QuestionStore
    + ContributionStore
    + PeopleStore
    + ContentStore
    + MediaStore
    + AuditStore
    + BugReportStore
    + SettingsStore
    + BackupStore
{
}

impl<T> Store for T where
    T: ProfileStore
        + QuestionStore
        + ContributionStore
        + PeopleStore
        + ContentStore
        + MediaStore
        + AuditStore
        + BugReportStore
        + SettingsStore
        + BackupStore
{
}
