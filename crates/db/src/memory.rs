//! In-memory implementation of every store port.
//!
//! Used by workflow and HTTP tests. Besides plain storage it supports fault
//! injection: [`MemoryStore::fail_on`] makes a named operation return
//! [`StoreError::Backend`], and [`MemoryStore::force_person_conflicts`]
//! makes the next N person inserts report a handle conflict.
//!
//! Backup operations work on a separate set of raw JSON tables
//! ([`MemoryStore::seed_table`], [`MemoryStore::table_rows`]) rather than on
//! the typed collections.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use giapha_core::bug_report::BugStatus;
use giapha_core::contribution::ContributionStatus;
use giapha_core::error::CoreError;
use giapha_core::media::MediaState;
use giapha_core::person_columns::{self, PersonFieldValue};
use giapha_core::restore::TableSpec;
use giapha_core::roles::{PROFILE_STATUS_ACTIVE, ROLE_ADMIN};
use giapha_core::types::DbId;
use serde_json::Value;
use uuid::Uuid;

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

#[derive(Debug, Clone)]
struct QuestionRow {
    id: DbId,
    question: String,
    hint: Option<String>,
    correct_answer: String,
    is_active: bool,
}

#[derive(Default)]
struct Inner {
    profiles: Vec<Profile>,
    questions: Vec<QuestionRow>,
    contributions: Vec<Contribution>,
    people: Vec<Person>,
    families: Vec<Family>,
    events: Vec<ClanEvent>,
    posts: Vec<Post>,
    media: Vec<Media>,
    audit: Vec<AuditLog>,
    bug_reports: Vec<BugReport>,
    settings: HashMap<String, Value>,
    tables: HashMap<String, Vec<Value>>,
    failures: HashSet<String>,
    person_conflicts: usize,
    upsert_calls: Vec<(String, usize)>,
}

impl Inner {
    fn check(&self, op: &str) -> StoreResult<()> {
        if self.failures.contains(op) {
            Err(StoreError::Backend(format!("injected failure: {op}")))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ---------------------------------------------------------------------
    // Fault injection
    // ---------------------------------------------------------------------

    /// Make operation `op` fail until [`MemoryStore::clear_failure`]. Names
    /// are the port method names (e.g. `"insert_event"`); backup upserts use
    /// `"upsert:<table>"`.
    pub fn fail_on(&self, op: &str) {
        self.lock().failures.insert(op.to_string());
    }

    pub fn clear_failure(&self, op: &str) {
        self.lock().failures.remove(op);
    }

    /// Report a unique-handle conflict on the next `count` person inserts.
    pub fn force_person_conflicts(&self, count: usize) {
        self.lock().person_conflicts = count;
    }

    // ---------------------------------------------------------------------
    // Seeding
    // ---------------------------------------------------------------------

    pub fn add_profile(&self, id: DbId, email: &str, role: &str, status: &str) -> Profile {
        let profile = Profile {
            id,
            email: email.to_string(),
            display_name: None,
            role: role.to_string(),
            status: status.to_string(),
            created_at: Utc::now(),
        };
        self.lock().profiles.push(profile.clone());
        profile
    }

    pub fn add_question(
        &self,
        question: &str,
        answer: &str,
        hint: Option<&str>,
        is_active: bool,
    ) -> DbId {
        let id = Uuid::new_v4();
        self.lock().questions.push(QuestionRow {
            id,
            question: question.to_string(),
            hint: hint.map(str::to_string),
            correct_answer: answer.to_string(),
            is_active,
        });
        id
    }

    /// Seed a person directly, bypassing fault injection.
    pub fn add_person(&self, input: &NewPerson) -> Person {
        let person = person_from(input);
        self.lock().people.push(person.clone());
        person
    }

    /// Seed a raw backup table.
    pub fn seed_table(&self, table: &str, rows: Vec<Value>) {
        self.lock().tables.insert(table.to_string(), rows);
    }

    // ---------------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------------

    pub fn contributions(&self) -> Vec<Contribution> {
        self.lock().contributions.clone()
    }

    pub fn people(&self) -> Vec<Person> {
        self.lock().people.clone()
    }

    pub fn families(&self) -> Vec<Family> {
        self.lock().families.clone()
    }

    pub fn events(&self) -> Vec<ClanEvent> {
        self.lock().events.clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.lock().posts.clone()
    }

    pub fn media(&self) -> Vec<Media> {
        self.lock().media.clone()
    }

    pub fn audit_logs(&self) -> Vec<AuditLog> {
        self.lock().audit.clone()
    }

    pub fn question_count(&self) -> usize {
        self.lock().questions.len()
    }

    pub fn setting(&self, key: &str) -> Option<Value> {
        self.lock().settings.get(key).cloned()
    }

    pub fn table_rows(&self, table: &str) -> Vec<Value> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    /// `(table, rows)` of every upsert call, in order.
    pub fn upsert_calls(&self) -> Vec<(String, usize)> {
        self.lock().upsert_calls.clone()
    }
}

fn person_from(input: &NewPerson) -> Person {
    let now = Utc::now();
    Person {
        id: Uuid::new_v4(),
        handle: input.handle.clone(),
        display_name: input.display_name.clone(),
        gender: input.gender,
        generation: input.generation,
        birth_year: input.birth_year,
        birth_month: input.birth_month,
        birth_day: input.birth_day,
        death_year: input.death_year,
        death_month: None,
        death_day: None,
        is_living: input.is_living,
        occupation: input.occupation.clone(),
        current_address: input.current_address.clone(),
        hometown: None,
        phone: input.phone.clone(),
        email: input.email.clone(),
        education: None,
        biography: None,
        nick_name: None,
        notes: input.notes.clone(),
        avatar_url: None,
        created_at: now,
        updated_at: now,
    }
}

/// Write `value` into the named column of `person`.
fn apply_field(person: &mut Person, column: &str, value: &PersonFieldValue) -> Result<(), CoreError> {
    let mismatch = || CoreError::Validation(format!("Giá trị không hợp lệ cho trường '{column}'"));
    match value {
        PersonFieldValue::Text(v) => {
            let slot = match column {
                "occupation" => &mut person.occupation,
                "current_address" => &mut person.current_address,
                "hometown" => &mut person.hometown,
                "phone" => &mut person.phone,
                "email" => &mut person.email,
                "education" => &mut person.education,
                "biography" => &mut person.biography,
                "nick_name" => &mut person.nick_name,
                "display_name" => {
                    person.display_name = v.clone().ok_or_else(mismatch)?;
                    return Ok(());
                }
                _ => return Err(mismatch()),
            };
            *slot = v.clone();
        }
        PersonFieldValue::Integer(v) => {
            let slot = match column {
                "birth_year" => &mut person.birth_year,
                "birth_month" => &mut person.birth_month,
                "birth_day" => &mut person.birth_day,
                "death_year" => &mut person.death_year,
                "death_month" => &mut person.death_month,
                "death_day" => &mut person.death_day,
                "gender" => {
                    person.gender = v.ok_or_else(mismatch)?;
                    return Ok(());
                }
                "generation" => {
                    person.generation = v.ok_or_else(mismatch)?;
                    return Ok(());
                }
                _ => return Err(mismatch()),
            };
            *slot = *v;
        }
        PersonFieldValue::Boolean(v) => match column {
            "is_living" => person.is_living = *v,
            _ => return Err(mismatch()),
        },
    }
    Ok(())
}

/// Newest-first ordering that keeps later inserts ahead on equal timestamps.
fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = items.iter().rev().cloned().collect();
    out.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    out
}

fn page<T>(items: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(0))
        .collect()
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_profile(&self, id: DbId) -> StoreResult<Option<Profile>> {
        let inner = self.lock();
        inner.check("find_profile")?;
        Ok(inner.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn list_active_admins(&self) -> StoreResult<Vec<Profile>> {
        let inner = self.lock();
        inner.check("list_active_admins")?;
        Ok(inner
            .profiles
            .iter()
            .filter(|p| p.role == ROLE_ADMIN && p.status == PROFILE_STATUS_ACTIVE)
            .cloned()
            .collect())
    }

    async fn list_active_profiles(&self) -> StoreResult<Vec<Profile>> {
        let inner = self.lock();
        inner.check("list_active_profiles")?;
        Ok(inner
            .profiles
            .iter()
            .filter(|p| p.status == PROFILE_STATUS_ACTIVE)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn list_active_questions(&self) -> StoreResult<Vec<PublicQuestion>> {
        let inner = self.lock();
        inner.check("list_active_questions")?;
        Ok(inner
            .questions
            .iter()
            .filter(|q| q.is_active)
            .map(|q| PublicQuestion {
                id: q.id,
                question: q.question.clone(),
                hint: q.hint.clone(),
            })
            .collect())
    }

    async fn find_active_answers(&self, ids: &[DbId]) -> StoreResult<Vec<QuestionAnswer>> {
        let inner = self.lock();
        inner.check("find_active_answers")?;
        Ok(inner
            .questions
            .iter()
            .filter(|q| q.is_active && ids.contains(&q.id))
            .map(|q| QuestionAnswer {
                id: q.id,
                correct_answer: q.correct_answer.clone(),
            })
            .collect())
    }

    async fn insert_question(&self, input: &NewQuestion) -> StoreResult<DbId> {
        let mut inner = self.lock();
        inner.check("insert_question")?;
        let id = Uuid::new_v4();
        inner.questions.push(QuestionRow {
            id,
            question: input.question.clone(),
            hint: input.hint.clone(),
            correct_answer: input.correct_answer.clone(),
            is_active: true,
        });
        Ok(id)
    }
}

#[async_trait]
impl ContributionStore for MemoryStore {
    async fn insert_contribution(&self, input: &NewContribution) -> StoreResult<Contribution> {
        let mut inner = self.lock();
        inner.check("insert_contribution")?;
        let row = Contribution {
            id: Uuid::new_v4(),
            author_id: input.author_id,
            author_email: input.author_email.clone(),
            field_name: input.field_name.as_str().to_string(),
            field_label: input.field_label.clone(),
            person_name: input.person_name.clone(),
            person_handle: input.person_handle.clone(),
            new_value: input.new_value.clone(),
            status: ContributionStatus::Pending.as_str().to_string(),
            review_note: None,
            created_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
        };
        inner.contributions.push(row.clone());
        Ok(row)
    }

    async fn find_contribution(&self, id: DbId) -> StoreResult<Option<Contribution>> {
        let inner = self.lock();
        inner.check("find_contribution")?;
        Ok(inner.contributions.iter().find(|c| c.id == id).cloned())
    }

    async fn list_contributions(
        &self,
        filter: &ContributionFilter,
    ) -> StoreResult<Vec<Contribution>> {
        let inner = self.lock();
        inner.check("list_contributions")?;
        let matching: Vec<Contribution> = inner
            .contributions
            .iter()
            .filter(|c| filter.status.is_none_or(|s| c.status == s.as_str()))
            .filter(|c| filter.author_id.is_none_or(|a| c.author_id == a))
            .cloned()
            .collect();
        Ok(page(
            newest_first(&matching, |c| c.created_at),
            filter.limit,
            filter.offset,
        ))
    }

    async fn transition_contribution(
        &self,
        id: DbId,
        from: ContributionStatus,
        to: ContributionStatus,
        reviewer: Option<DbId>,
        review_note: Option<&str>,
    ) -> StoreResult<Option<Contribution>> {
        let mut inner = self.lock();
        inner.check("transition_contribution")?;
        let Some(row) = inner
            .contributions
            .iter_mut()
            .find(|c| c.id == id && c.status == from.as_str())
        else {
            return Ok(None);
        };
        row.status = to.as_str().to_string();
        if to == ContributionStatus::Pending {
            row.reviewed_by = None;
            row.reviewed_at = None;
        } else {
            row.reviewed_by = reviewer;
            row.reviewed_at = Some(Utc::now());
            row.review_note = review_note.map(str::to_string);
        }
        Ok(Some(row.clone()))
    }
}

#[async_trait]
impl PeopleStore for MemoryStore {
    async fn insert_person(&self, input: &NewPerson) -> StoreResult<Person> {
        let mut inner = self.lock();
        inner.check("insert_person")?;
        if inner.person_conflicts > 0 {
            inner.person_conflicts -= 1;
            return Err(StoreError::Conflict("uq_people_handle".into()));
        }
        if inner.people.iter().any(|p| p.handle == input.handle) {
            return Err(StoreError::Conflict("uq_people_handle".into()));
        }
        let person = person_from(input);
        inner.people.push(person.clone());
        Ok(person)
    }

    async fn find_person(&self, handle: &str) -> StoreResult<Option<Person>> {
        let inner = self.lock();
        inner.check("find_person")?;
        Ok(inner.people.iter().find(|p| p.handle == handle).cloned())
    }

    async fn update_person_field(
        &self,
        handle: &str,
        column: &str,
        value: &PersonFieldValue,
    ) -> StoreResult<bool> {
        let column = person_columns::lookup(column)?.name;
        let mut inner = self.lock();
        inner.check("update_person_field")?;
        let Some(person) = inner.people.iter_mut().find(|p| p.handle == handle) else {
            return Ok(false);
        };
        apply_field(person, column, value)?;
        person.updated_at = Utc::now();
        Ok(true)
    }

    async fn set_avatar_url(&self, handle: &str, url: Option<&str>) -> StoreResult<bool> {
        let mut inner = self.lock();
        inner.check("set_avatar_url")?;
        let Some(person) = inner.people.iter_mut().find(|p| p.handle == handle) else {
            return Ok(false);
        };
        person.avatar_url = url.map(str::to_string);
        person.updated_at = Utc::now();
        Ok(true)
    }

    async fn insert_family(&self, input: &NewFamily) -> StoreResult<Family> {
        let mut inner = self.lock();
        inner.check("insert_family")?;
        if inner.families.iter().any(|f| f.handle == input.handle) {
            return Err(StoreError::Conflict("uq_families_handle".into()));
        }
        let family = Family {
            id: Uuid::new_v4(),
            handle: input.handle.clone(),
            father_handle: input.father_handle.clone(),
            mother_handle: input.mother_handle.clone(),
            created_at: Utc::now(),
        };
        inner.families.push(family.clone());
        Ok(family)
    }

    async fn list_living_with_birthdays(&self) -> StoreResult<Vec<Person>> {
        let inner = self.lock();
        inner.check("list_living_with_birthdays")?;
        Ok(inner
            .people
            .iter()
            .filter(|p| p.is_living && p.birth_month.is_some() && p.birth_day.is_some())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn insert_event(&self, input: &NewClanEvent) -> StoreResult<ClanEvent> {
        let mut inner = self.lock();
        inner.check("insert_event")?;
        let event = ClanEvent {
            id: Uuid::new_v4(),
            title: input.title.clone(),
            description: input.description.clone(),
            start_at: input.start_at,
            end_at: input.end_at,
            location: input.location.clone(),
            event_type: input.event_type.as_str().to_string(),
            created_by: input.created_by,
            created_at: Utc::now(),
        };
        inner.events.push(event.clone());
        Ok(event)
    }

    async fn insert_post(&self, input: &NewPost) -> StoreResult<Post> {
        let mut inner = self.lock();
        inner.check("insert_post")?;
        let post = Post {
            id: Uuid::new_v4(),
            author_id: input.author_id,
            title: input.title.clone(),
            content: input.content.clone(),
            created_at: Utc::now(),
        };
        inner.posts.push(post.clone());
        Ok(post)
    }
}

#[async_trait]
impl MediaStore for MemoryStore {
    async fn count_media_in_states(
        &self,
        uploader: DbId,
        states: &[MediaState],
    ) -> StoreResult<i64> {
        let inner = self.lock();
        inner.check("count_media_in_states")?;
        let count = inner
            .media
            .iter()
            .filter(|m| m.uploader_id == uploader)
            .filter(|m| states.iter().any(|s| m.state == s.as_str()))
            .count();
        Ok(count as i64)
    }

    async fn insert_media(&self, input: &NewMedia) -> StoreResult<Media> {
        let mut inner = self.lock();
        inner.check("insert_media")?;
        let media = Media {
            id: Uuid::new_v4(),
            file_name: input.file_name.clone(),
            mime_type: input.mime_type.clone(),
            file_size: input.file_size,
            state: MediaState::Pending.as_str().to_string(),
            uploader_id: input.uploader_id,
            storage_path: input.storage_path.clone(),
            storage_url: input.storage_url.clone(),
            media_type: input.media_type.as_str().to_string(),
            linked_person: input.linked_person.clone(),
            title: input.title.clone(),
            description: input.description.clone(),
            created_at: Utc::now(),
        };
        inner.media.push(media.clone());
        Ok(media)
    }

    async fn find_media(&self, id: DbId) -> StoreResult<Option<Media>> {
        let inner = self.lock();
        inner.check("find_media")?;
        Ok(inner.media.iter().find(|m| m.id == id).cloned())
    }

    async fn transition_media(
        &self,
        id: DbId,
        from: MediaState,
        to: MediaState,
    ) -> StoreResult<Option<Media>> {
        let mut inner = self.lock();
        inner.check("transition_media")?;
        let Some(media) = inner
            .media
            .iter_mut()
            .find(|m| m.id == id && m.state == from.as_str())
        else {
            return Ok(None);
        };
        media.state = to.as_str().to_string();
        Ok(Some(media.clone()))
    }
}

fn audit_matches(entry: &AuditLog, query: &AuditQuery) -> bool {
    query.action.as_deref().is_none_or(|a| entry.action == a)
        && query
            .entity_type
            .as_deref()
            .is_none_or(|t| entry.entity_type == t)
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn insert_audit(&self, input: &NewAuditLog) -> StoreResult<AuditLog> {
        let mut inner = self.lock();
        inner.check("insert_audit")?;
        let entry = AuditLog {
            id: Uuid::new_v4(),
            actor_id: input.actor_id,
            actor_email: input.actor_email.clone(),
            action: input.action.clone(),
            entity_type: input.entity_type.clone(),
            entity_id: input.entity_id.clone(),
            metadata: input.metadata.clone(),
            created_at: Utc::now(),
        };
        inner.audit.push(entry.clone());
        Ok(entry)
    }

    async fn query_audit(&self, query: &AuditQuery) -> StoreResult<Vec<AuditLog>> {
        let inner = self.lock();
        inner.check("query_audit")?;
        let matching: Vec<AuditLog> = inner
            .audit
            .iter()
            .filter(|e| audit_matches(e, query))
            .cloned()
            .collect();
        Ok(page(
            newest_first(&matching, |e| e.created_at),
            query.limit,
            query.offset,
        ))
    }

    async fn count_audit(&self, query: &AuditQuery) -> StoreResult<i64> {
        let inner = self.lock();
        inner.check("count_audit")?;
        Ok(inner.audit.iter().filter(|e| audit_matches(e, query)).count() as i64)
    }
}

#[async_trait]
impl BugReportStore for MemoryStore {
    async fn create_bug_report(
        &self,
        reporter: DbId,
        input: &CreateBugReport,
    ) -> StoreResult<BugReport> {
        let mut inner = self.lock();
        inner.check("create_bug_report")?;
        let now = Utc::now();
        let report = BugReport {
            id: Uuid::new_v4(),
            reporter_id: reporter,
            title: input.title.trim().to_string(),
            description: input.description.clone(),
            page_url: input.page_url.clone(),
            status: BugStatus::Open.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.bug_reports.push(report.clone());
        Ok(report)
    }

    async fn find_bug_report(&self, id: DbId) -> StoreResult<Option<BugReport>> {
        let inner = self.lock();
        inner.check("find_bug_report")?;
        Ok(inner.bug_reports.iter().find(|r| r.id == id).cloned())
    }

    async fn list_bug_reports(
        &self,
        status: Option<BugStatus>,
        reporter: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<BugReport>> {
        let inner = self.lock();
        inner.check("list_bug_reports")?;
        let matching: Vec<BugReport> = inner
            .bug_reports
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s.as_str()))
            .filter(|r| reporter.is_none_or(|id| r.reporter_id == id))
            .cloned()
            .collect();
        Ok(page(newest_first(&matching, |r| r.created_at), limit, offset))
    }

    async fn update_bug_report_status(
        &self,
        id: DbId,
        status: BugStatus,
    ) -> StoreResult<Option<BugReport>> {
        let mut inner = self.lock();
        inner.check("update_bug_report_status")?;
        let Some(report) = inner.bug_reports.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        report.status = status.to_string();
        report.updated_at = Utc::now();
        Ok(Some(report.clone()))
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn claim_setting(&self, key: &str, value: &Value) -> StoreResult<bool> {
        let mut inner = self.lock();
        inner.check("claim_setting")?;
        if inner.settings.contains_key(key) {
            return Ok(false);
        }
        inner.settings.insert(key.to_string(), value.clone());
        Ok(true)
    }
}

/// Keep only the columns the table writes.
fn project(table: &TableSpec, row: &Value) -> Value {
    let mut out = serde_json::Map::new();
    for column in table.columns {
        if let Some(v) = row.get(*column) {
            out.insert((*column).to_string(), v.clone());
        }
    }
    Value::Object(out)
}

fn same_key(table: &TableSpec, a: &Value, b: &Value) -> bool {
    table
        .conflict_target
        .iter()
        .all(|c| a.get(*c).is_some() && a.get(*c) == b.get(*c))
}

#[async_trait]
impl BackupStore for MemoryStore {
    async fn export_table(&self, table: &TableSpec) -> StoreResult<Vec<Value>> {
        let inner = self.lock();
        inner.check(&format!("export:{}", table.name))?;
        Ok(inner
            .tables
            .get(table.name)
            .map(|rows| rows.iter().map(|r| project(table, r)).collect())
            .unwrap_or_default())
    }

    async fn upsert_rows(&self, table: &TableSpec, rows: &[Value]) -> StoreResult<usize> {
        let mut inner = self.lock();
        inner.upsert_calls.push((table.name.to_string(), rows.len()));
        inner.check(&format!("upsert:{}", table.name))?;
        let stored = inner.tables.entry(table.name.to_string()).or_default();
        for row in rows {
            let row = project(table, row);
            match stored.iter_mut().find(|existing| same_key(table, existing, &row)) {
                Some(existing) => {
                    if let (Value::Object(dst), Value::Object(src)) = (existing, row) {
                        for (k, v) in src {
                            if k != "id" {
                                dst.insert(k, v);
                            }
                        }
                    }
                }
                None => stored.push(row),
            }
        }
        Ok(rows.len())
    }
}
