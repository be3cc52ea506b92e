use axum::extract::State;
use chrono::Utc;
use giapha_pipeline::birthday::{self, BirthdayReport};

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::cron::CronCaller;
use crate::state::AppState;

/// GET /cron/birthday -- greet today's birthdays, remind about tomorrow's.
/// Safe to call more than once a day.
pub async fn run_birthday_job(
    _caller: CronCaller,
    State(state): State<AppState>,
) -> AppResult<Json<BirthdayReport>> {
    let report = birthday::run(state.store.as_ref(), state.notifier.as_ref(), Utc::now()).await?;
    Ok(Json(report))
}
