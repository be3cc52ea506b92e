//! Contribution pipeline: submit, list, review and apply.
//!
//! A contribution is applied at most once. Review first moves the row from
//! `pending` with a conditional update; only the caller that wins that update
//! applies the payload. If applying fails the row is moved back to `pending`
//! so the review can be retried.

use std::sync::Arc;

use giapha_core::audit::{
    ACTION_CONTRIBUTION_APPROVED, ACTION_CONTRIBUTION_REJECTED, ENTITY_CONTRIBUTION,
};
use giapha_core::contribution::{
    parse_payload, validate_review_target, AddEventPayload, AddPersonPayload, AddPostPayload,
    AddQuizQuestionPayload, ContributionPayload, ContributionStatus, EditPersonFieldPayload,
    FieldName,
};
use giapha_core::error::CoreError;
use giapha_core::handle::generate_handle;
use giapha_core::types::DbId;
use giapha_db::models::content::{NewClanEvent, NewPost};
use giapha_db::models::contribution::{
    Contribution, ContributionFilter, NewContribution, ReviewContribution, SubmitContribution,
};
use giapha_db::models::person::{NewFamily, NewPerson, Person};
use giapha_db::models::question::NewQuestion;
use giapha_db::Store;
use giapha_events::{spawn_notifications, templates, Notifier};
use serde::Serialize;

use crate::actor::Actor;
use crate::audit;
use crate::error::{PipelineError, PipelineResult};

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate and store a new `pending` contribution, then notify admins in
/// the background.
pub async fn submit(
    store: &dyn Store,
    notifier: Arc<dyn Notifier>,
    author: &Actor,
    input: SubmitContribution,
) -> PipelineResult<Contribution> {
    let field_name: FieldName = input.field_name.parse()?;
    let payload = parse_payload(field_name, &input.new_value)?;

    let person_handle = non_blank(input.person_handle);
    if matches!(payload, ContributionPayload::EditPersonField(_)) && person_handle.is_none() {
        return Err(CoreError::Validation("Thiếu mã thành viên cần chỉnh sửa".into()).into());
    }

    let field_label = match input.field_label.trim() {
        "" => field_name.as_str().to_string(),
        label => label.to_string(),
    };

    let row = store
        .insert_contribution(&NewContribution {
            author_id: author.id,
            author_email: author.email.clone(),
            field_name,
            field_label,
            person_name: non_blank(input.person_name),
            person_handle,
            new_value: input.new_value,
        })
        .await?;

    tracing::info!(
        contribution_id = %row.id,
        user_id = %author.id,
        field_name = %field_name,
        "Contribution submitted",
    );

    notify_admins(store, notifier, &row).await;
    Ok(row)
}

/// Queue one review-request email per active admin. Never fails.
async fn notify_admins(store: &dyn Store, notifier: Arc<dyn Notifier>, row: &Contribution) {
    let admins = match store.list_active_admins().await {
        Ok(admins) => admins,
        Err(e) => {
            tracing::warn!(contribution_id = %row.id, error = %e, "Could not load admins to notify");
            return;
        }
    };
    let notifications = admins
        .iter()
        .map(|admin| {
            templates::contribution_submitted(
                &admin.email,
                &row.author_email,
                &row.field_label,
                row.person_name.as_deref(),
            )
        })
        .collect::<Vec<_>>();
    if !notifications.is_empty() {
        spawn_notifications(notifier, notifications);
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Admins see every contribution; everyone else sees their own.
pub async fn list(
    store: &dyn Store,
    actor: &Actor,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> PipelineResult<Vec<Contribution>> {
    let status = status
        .filter(|s| !s.is_empty())
        .map(str::parse::<ContributionStatus>)
        .transpose()?;
    let filter = ContributionFilter {
        status,
        author_id: (!actor.is_admin()).then_some(actor.id),
        limit,
        offset,
    };
    Ok(store.list_contributions(&filter).await?)
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

/// Result of a review call.
#[derive(Debug, Serialize)]
pub struct ReviewOutcome {
    #[serde(rename = "data")]
    pub contribution: Contribution,
    /// `true` only when this call applied the contribution.
    pub applied: bool,
}

/// Approve or reject a pending contribution.
///
/// Reviewing a contribution that is no longer pending is not an error: the
/// current row is returned with `applied = false`.
pub async fn review(
    store: &dyn Store,
    reviewer: &Actor,
    id: DbId,
    input: &ReviewContribution,
) -> PipelineResult<ReviewOutcome> {
    validate_review_target(input.status)?;
    let note = input
        .review_note
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let claimed = store
        .transition_contribution(
            id,
            ContributionStatus::Pending,
            input.status,
            Some(reviewer.id),
            note,
        )
        .await?;

    let Some(updated) = claimed else {
        let current = store
            .find_contribution(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Contribution", id))?;
        tracing::info!(
            contribution_id = %id,
            status = %current.status,
            "Contribution already reviewed; nothing to do",
        );
        return Ok(ReviewOutcome {
            contribution: current,
            applied: false,
        });
    };

    let mut applied_change = None;
    if input.status == ContributionStatus::Approved {
        match apply(store, &updated).await {
            Ok(change) => applied_change = Some(change),
            Err(e) => {
                tracing::error!(contribution_id = %id, error = %e, "Apply failed; reverting to pending");
                revert_to_pending(store, id).await;
                return Err(e);
            }
        }
    }

    let action = match input.status {
        ContributionStatus::Approved => ACTION_CONTRIBUTION_APPROVED,
        _ => ACTION_CONTRIBUTION_REJECTED,
    };
    audit::record(
        store,
        reviewer,
        action,
        ENTITY_CONTRIBUTION,
        Some(id.to_string()),
        serde_json::json!({
            "field_name": updated.field_name,
            "author_email": updated.author_email,
            "person_handle": updated.person_handle,
            "review_note": updated.review_note,
            "applied": applied_change,
        }),
    )
    .await;

    tracing::info!(
        contribution_id = %id,
        reviewer_id = %reviewer.id,
        status = %input.status,
        "Contribution reviewed",
    );

    Ok(ReviewOutcome {
        contribution: updated,
        applied: applied_change.is_some(),
    })
}

/// Compensation for a failed apply. Only moves the row back if it is still
/// `approved`.
async fn revert_to_pending(store: &dyn Store, id: DbId) {
    match store
        .transition_contribution(
            id,
            ContributionStatus::Approved,
            ContributionStatus::Pending,
            None,
            None,
        )
        .await
    {
        Ok(Some(_)) => tracing::info!(contribution_id = %id, "Contribution reverted to pending"),
        Ok(None) => tracing::warn!(contribution_id = %id, "Contribution no longer approved; not reverted"),
        Err(e) => tracing::error!(contribution_id = %id, error = %e, "Failed to revert contribution"),
    }
}

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

/// What an applied contribution changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppliedChange {
    PersonAdded { handle: String },
    PersonFieldUpdated { handle: String, column: String },
    EventAdded { id: DbId },
    PostAdded { id: DbId },
    QuizQuestionAdded { id: DbId },
}

/// Write an approved contribution's payload into the canonical tables.
pub async fn apply(store: &dyn Store, contribution: &Contribution) -> PipelineResult<AppliedChange> {
    let payload = parse_payload(contribution.field()?, &contribution.new_value)?;
    let change = match payload {
        ContributionPayload::AddPerson(p) => add_person(store, &p).await?,
        ContributionPayload::EditPersonField(p) => {
            edit_person_field(store, contribution.person_handle.as_deref(), &p).await?
        }
        ContributionPayload::AddEvent(p) => add_event(store, contribution.author_id, &p).await?,
        ContributionPayload::AddQuizQuestion(p) => add_quiz_question(store, &p).await?,
        ContributionPayload::AddPost(p) => add_post(store, contribution.author_id, &p).await?,
    };
    tracing::info!(contribution_id = %contribution.id, change = ?change, "Contribution applied");
    Ok(change)
}

async fn add_person(store: &dyn Store, p: &AddPersonPayload) -> PipelineResult<AppliedChange> {
    let display_name = p.display_name.trim().to_string();
    let mut input = NewPerson {
        handle: generate_handle(&display_name),
        display_name: display_name.clone(),
        gender: p.gender,
        generation: p.generation,
        birth_year: p.birth_year,
        birth_month: p.birth_month,
        birth_day: p.birth_day,
        death_year: p.death_year,
        is_living: p.resolved_is_living(),
        occupation: non_blank(p.occupation.clone()),
        current_address: non_blank(p.current_address.clone()),
        phone: non_blank(p.phone.clone()),
        email: non_blank(p.email.clone()),
        notes: non_blank(p.relation_hint.clone()),
    };

    let person = match store.insert_person(&input).await {
        Ok(person) => person,
        Err(e) if e.is_conflict() => {
            let taken = std::mem::replace(&mut input.handle, generate_handle(&display_name));
            tracing::warn!(handle = %taken, retry = %input.handle, "Handle taken; retrying once");
            store.insert_person(&input).await?
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(spouse) = non_blank(p.spouse_handle.clone()) {
        link_spouse(store, &person, &spouse).await;
    }

    Ok(AppliedChange::PersonAdded {
        handle: person.handle,
    })
}

/// Create a family joining the new person and an existing spouse. The person
/// is already stored, so failures here are logged only.
async fn link_spouse(store: &dyn Store, person: &Person, spouse_handle: &str) {
    match store.find_person(spouse_handle).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::warn!(handle = %person.handle, spouse = spouse_handle, "Spouse not found; family not created");
            return;
        }
        Err(e) => {
            tracing::warn!(handle = %person.handle, error = %e, "Spouse lookup failed");
            return;
        }
    }

    let (father, mother) = if person.gender == 2 {
        (spouse_handle.to_string(), person.handle.clone())
    } else {
        (person.handle.clone(), spouse_handle.to_string())
    };
    let family = NewFamily {
        handle: format!("F-{}", person.handle),
        father_handle: Some(father),
        mother_handle: Some(mother),
    };
    if let Err(e) = store.insert_family(&family).await {
        tracing::warn!(handle = %person.handle, error = %e, "Failed to create spouse family");
    }
}

async fn edit_person_field(
    store: &dyn Store,
    handle: Option<&str>,
    p: &EditPersonFieldPayload,
) -> PipelineResult<AppliedChange> {
    let handle = handle
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| CoreError::Validation("Thiếu mã thành viên cần chỉnh sửa".into()))?;
    let (column, value) = p.resolve()?;

    if !store.update_person_field(handle, column, &value).await? {
        return Err(PipelineError::Core(CoreError::not_found("Person", handle)));
    }

    Ok(AppliedChange::PersonFieldUpdated {
        handle: handle.to_string(),
        column: column.to_string(),
    })
}

async fn add_event(
    store: &dyn Store,
    author_id: DbId,
    p: &AddEventPayload,
) -> PipelineResult<AppliedChange> {
    let event = store
        .insert_event(&NewClanEvent {
            title: p.title.trim().to_string(),
            description: non_blank(p.description.clone()),
            start_at: p.start_at,
            end_at: p.end_at,
            location: non_blank(p.location.clone()),
            event_type: p.normalized_type(),
            created_by: Some(author_id),
        })
        .await?;
    Ok(AppliedChange::EventAdded { id: event.id })
}

async fn add_quiz_question(
    store: &dyn Store,
    p: &AddQuizQuestionPayload,
) -> PipelineResult<AppliedChange> {
    let id = store
        .insert_question(&NewQuestion {
            question: p.question.trim().to_string(),
            correct_answer: p.correct_answer.trim().to_string(),
            hint: non_blank(p.hint.clone()),
        })
        .await?;
    Ok(AppliedChange::QuizQuestionAdded { id })
}

async fn add_post(
    store: &dyn Store,
    author_id: DbId,
    p: &AddPostPayload,
) -> PipelineResult<AppliedChange> {
    let post = store
        .insert_post(&NewPost {
            author_id,
            title: non_blank(p.title.clone()),
            content: p.content.trim().to_string(),
        })
        .await?;
    Ok(AppliedChange::PostAdded { id: post.id })
}
