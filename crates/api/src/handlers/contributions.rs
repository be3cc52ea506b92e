//! Handlers for member contributions.
//!
//! Active members submit; everyone lists (admins see all, others their
//! own); admins review. Approval applies the contribution exactly once.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use giapha_core::pagination::{clamp_limit, clamp_offset};
use giapha_core::types::DbId;
use giapha_db::models::contribution::{
    ContributionListParams, ReviewContribution, SubmitContribution,
};
use giapha_pipeline::contributions::{self, ReviewOutcome};

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireActive, RequireAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /contributions
// ---------------------------------------------------------------------------

pub async fn submit_contribution(
    RequireActive(user): RequireActive,
    State(state): State<AppState>,
    Json(input): Json<SubmitContribution>,
) -> AppResult<impl IntoResponse> {
    let row = contributions::submit(
        state.store.as_ref(),
        state.notifier.clone(),
        &user.actor(),
        input,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

// ---------------------------------------------------------------------------
// GET /contributions
// ---------------------------------------------------------------------------

pub async fn list_contributions(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ContributionListParams>,
) -> AppResult<impl IntoResponse> {
    let rows = contributions::list(
        state.store.as_ref(),
        &auth.actor(),
        params.status.as_deref(),
        clamp_limit(params.limit, 50, 200),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// PATCH /contributions/{id}
// ---------------------------------------------------------------------------

/// Approve or reject. Reviewing an already-reviewed contribution returns it
/// unchanged with `applied: false`.
pub async fn review_contribution(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewContribution>,
) -> AppResult<Json<ReviewOutcome>> {
    let outcome =
        contributions::review(state.store.as_ref(), &admin.actor(), id, &input).await?;
    Ok(Json(outcome))
}
