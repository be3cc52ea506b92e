//! Postgres adapter for the store ports.

use async_trait::async_trait;
use giapha_core::bug_report::BugStatus;
use giapha_core::contribution::ContributionStatus;
use giapha_core::media::MediaState;
use giapha_core::person_columns::PersonFieldValue;
use giapha_core::restore::TableSpec;
use giapha_core::types::DbId;
use sqlx::PgPool;

use super::person_repo::UpdateFieldError;
use super::{
    AuditLogRepo, BackupRepo, BugReportRepo, ContentRepo, ContributionRepo, MediaRepo,
    PersonRepo, ProfileRepo, QuestionRepo, SettingsRepo,
};
use crate::error::{StoreError, StoreResult};
use crate::models::audit::{AuditLog, AuditQuery, NewAuditLog};
use crate::models::bug_report::{BugReport, CreateBugReport};
use crate::models::content::{ClanEvent, NewClanEvent, NewPost, Post};
use crate::models::contribution::{Contribution, ContributionFilter, NewContribution};
use crate::models::media::{Media, NewMedia};
use crate::models::person::{Family, NewFamily, NewPerson, Person};
use crate::models::profile::Profile;
use crate::models::question::{NewQuestion, PublicQuestion, QuestionAnswer};
use crate::store::{
    AuditStore, BackupStore, BugReportStore, ContentStore, ContributionStore, MediaStore,
    PeopleStore, ProfileStore, QuestionStore, SettingsStore,
};

/// Store backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<UpdateFieldError> for StoreError {
    fn from(err: UpdateFieldError) -> Self {
        match err {
            UpdateFieldError::Rejected(e) => StoreError::Rejected(e),
            UpdateFieldError::Sql(e) => StoreError::from(e),
        }
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn find_profile(&self, id: DbId) -> StoreResult<Option<Profile>> {
        Ok(ProfileRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_active_admins(&self) -> StoreResult<Vec<Profile>> {
        Ok(ProfileRepo::list_active_admins(&self.pool).await?)
    }

    async fn list_active_profiles(&self) -> StoreResult<Vec<Profile>> {
        Ok(ProfileRepo::list_active(&self.pool, None).await?)
    }
}

#[async_trait]
impl QuestionStore for PgStore {
    async fn list_active_questions(&self) -> StoreResult<Vec<PublicQuestion>> {
        Ok(QuestionRepo::list_active_public(&self.pool).await?)
    }

    async fn find_active_answers(&self, ids: &[DbId]) -> StoreResult<Vec<QuestionAnswer>> {
        Ok(QuestionRepo::find_active_answers(&self.pool, ids).await?)
    }

    async fn insert_question(&self, input: &NewQuestion) -> StoreResult<DbId> {
        Ok(QuestionRepo::create(&self.pool, input).await?)
    }
}

#[async_trait]
impl ContributionStore for PgStore {
    async fn insert_contribution(&self, input: &NewContribution) -> StoreResult<Contribution> {
        Ok(ContributionRepo::create(&self.pool, input).await?)
    }

    async fn find_contribution(&self, id: DbId) -> StoreResult<Option<Contribution>> {
        Ok(ContributionRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_contributions(
        &self,
        filter: &ContributionFilter,
    ) -> StoreResult<Vec<Contribution>> {
        Ok(ContributionRepo::list_filtered(&self.pool, filter).await?)
    }

    async fn transition_contribution(
        &self,
        id: DbId,
        from: ContributionStatus,
        to: ContributionStatus,
        reviewer: Option<DbId>,
        review_note: Option<&str>,
    ) -> StoreResult<Option<Contribution>> {
        Ok(ContributionRepo::transition(&self.pool, id, from, to, reviewer, review_note).await?)
    }
}

#[async_trait]
impl PeopleStore for PgStore {
    async fn insert_person(&self, input: &NewPerson) -> StoreResult<Person> {
        Ok(PersonRepo::create(&self.pool, input).await?)
    }

    async fn find_person(&self, handle: &str) -> StoreResult<Option<Person>> {
        Ok(PersonRepo::find_by_handle(&self.pool, handle).await?)
    }

    async fn update_person_field(
        &self,
        handle: &str,
        column: &str,
        value: &PersonFieldValue,
    ) -> StoreResult<bool> {
        Ok(PersonRepo::update_field(&self.pool, handle, column, value).await?)
    }

    async fn set_avatar_url(&self, handle: &str, url: Option<&str>) -> StoreResult<bool> {
        Ok(PersonRepo::set_avatar_url(&self.pool, handle, url).await?)
    }

    async fn insert_family(&self, input: &NewFamily) -> StoreResult<Family> {
        Ok(PersonRepo::create_family(&self.pool, input).await?)
    }

    async fn list_living_with_birthdays(&self) -> StoreResult<Vec<Person>> {
        Ok(PersonRepo::list_living_with_birthdays(&self.pool).await?)
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn insert_event(&self, input: &NewClanEvent) -> StoreResult<ClanEvent> {
        Ok(ContentRepo::create_event(&self.pool, input).await?)
    }

    async fn insert_post(&self, input: &NewPost) -> StoreResult<Post> {
        Ok(ContentRepo::create_post(&self.pool, input).await?)
    }
}

#[async_trait]
impl MediaStore for PgStore {
    async fn count_media_in_states(
        &self,
        uploader: DbId,
        states: &[MediaState],
    ) -> StoreResult<i64> {
        Ok(MediaRepo::count_in_states(&self.pool, uploader, states).await?)
    }

    async fn insert_media(&self, input: &NewMedia) -> StoreResult<Media> {
        Ok(MediaRepo::create(&self.pool, input).await?)
    }

    async fn find_media(&self, id: DbId) -> StoreResult<Option<Media>> {
        Ok(MediaRepo::find_by_id(&self.pool, id).await?)
    }

    async fn transition_media(
        &self,
        id: DbId,
        from: MediaState,
        to: MediaState,
    ) -> StoreResult<Option<Media>> {
        Ok(MediaRepo::transition(&self.pool, id, from, to).await?)
    }
}

#[async_trait]
impl AuditStore for PgStore {
    async fn insert_audit(&self, input: &NewAuditLog) -> StoreResult<AuditLog> {
        Ok(AuditLogRepo::create(&self.pool, input).await?)
    }

    async fn query_audit(&self, query: &AuditQuery) -> StoreResult<Vec<AuditLog>> {
        Ok(AuditLogRepo::query(&self.pool, query).await?)
    }

    async fn count_audit(&self, query: &AuditQuery) -> StoreResult<i64> {
        Ok(AuditLogRepo::count(&self.pool, query).await?)
    }
}

#[async_trait]
impl BugReportStore for PgStore {
    async fn create_bug_report(
        &self,
        reporter: DbId,
        input: &CreateBugReport,
    ) -> StoreResult<BugReport> {
        Ok(BugReportRepo::create(&self.pool, reporter, input).await?)
    }

    async fn find_bug_report(&self, id: DbId) -> StoreResult<Option<BugReport>> {
        Ok(BugReportRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_bug_reports(
        &self,
        status: Option<BugStatus>,
        reporter: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<BugReport>> {
        Ok(BugReportRepo::list(&self.pool, status, reporter, limit, offset).await?)
    }

    async fn update_bug_report_status(
        &self,
        id: DbId,
        status: BugStatus,
    ) -> StoreResult<Option<BugReport>> {
        Ok(BugReportRepo::update_status(&self.pool, id, status).await?)
    }
}

#[async_trait]
impl SettingsStore for PgStore {
    async fn claim_setting(&self, key: &str, value: &serde_json::Value) -> StoreResult<bool> {
        Ok(SettingsRepo::insert_if_absent(&self.pool, key, value).await?)
    }
}

#[async_trait]
impl BackupStore for PgStore {
    async fn export_table(&self, table: &TableSpec) -> StoreResult<Vec<serde_json::Value>> {
        Ok(BackupRepo::export_table(&self.pool, table).await?)
    }

    async fn upsert_rows(
        &self,
        table: &TableSpec,
        rows: &[serde_json::Value],
    ) -> StoreResult<usize> {
        Ok(BackupRepo::upsert_rows(&self.pool, table, rows).await?)
    }
}
