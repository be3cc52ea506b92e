//! Handlers for in-app bug reports.
//!
//! Any signed-in user files reports and sees their own; admins see all of
//! them and move them through triage.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use giapha_core::bug_report::{validate_report, BugStatus};
use giapha_core::error::CoreError;
use giapha_core::pagination::{clamp_limit, clamp_offset};
use giapha_core::types::DbId;
use giapha_db::models::bug_report::{
    BugReport, BugReportListParams, CreateBugReport, UpdateBugReportStatus,
};

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

async fn load(state: &AppState, id: DbId) -> AppResult<BugReport> {
    Ok(state
        .store
        .find_bug_report(id)
        .await?
        .ok_or_else(|| CoreError::not_found("BugReport", id))?)
}

/// POST /bug-reports
pub async fn submit_bug_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBugReport>,
) -> AppResult<impl IntoResponse> {
    validate_report(&input.title, input.description.as_deref())?;

    let report = state
        .store
        .create_bug_report(auth.profile.id, &input)
        .await?;
    tracing::info!(bug_report_id = %report.id, user_id = %auth.profile.id, "Bug report filed");

    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// GET /bug-reports?status=&limit=&offset=
pub async fn list_bug_reports(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<BugReportListParams>,
) -> AppResult<Json<DataResponse<Vec<BugReport>>>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<BugStatus>)
        .transpose()?;
    let reporter = (!auth.profile.is_admin()).then_some(auth.profile.id);

    let data = state
        .store
        .list_bug_reports(
            status,
            reporter,
            clamp_limit(params.limit, 50, 200),
            clamp_offset(params.offset),
        )
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /bug-reports/{id} -- the reporter or an admin.
pub async fn get_bug_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BugReport>>> {
    let report = load(&state, id).await?;
    if report.reporter_id != auth.profile.id && !auth.profile.is_admin() {
        return Err(CoreError::Forbidden("Bạn chỉ xem được báo lỗi của mình".into()).into());
    }
    Ok(Json(DataResponse { data: report }))
}

/// PATCH /bug-reports/{id}
pub async fn update_bug_report_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBugReportStatus>,
) -> AppResult<Json<DataResponse<BugReport>>> {
    let next: BugStatus = input.status.parse()?;
    let current = load(&state, id).await?.status()?;
    current.ensure_can_become(next)?;

    let updated = state
        .store
        .update_bug_report_status(id, next)
        .await?
        .ok_or_else(|| CoreError::not_found("BugReport", id))?;

    tracing::info!(
        bug_report_id = %id,
        from = %current,
        to = %next,
        user_id = %admin.profile.id,
        "Bug report status changed",
    );
    Ok(Json(DataResponse { data: updated }))
}
