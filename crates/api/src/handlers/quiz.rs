//! Handlers for the public registration quiz.
//!
//! Both endpoints are unauthenticated. The question list never carries the
//! answer key, and grading only ever returns a boolean.

use axum::extract::State;
use giapha_core::quiz::SubmittedAnswer;
use giapha_db::models::question::PublicQuestion;
use giapha_pipeline::registration;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::Json;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyQuizRequest {
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Serialize)]
pub struct VerifyQuizResponse {
    pub passed: bool,
}

/// GET /questions -- up to three random active questions.
pub async fn list_questions(State(state): State<AppState>) -> AppResult<Json<QuestionsResponse>> {
    let questions = registration::fetch_questions(state.store.as_ref()).await?;
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /verify-quiz
pub async fn verify_quiz(
    State(state): State<AppState>,
    Json(input): Json<VerifyQuizRequest>,
) -> AppResult<Json<VerifyQuizResponse>> {
    let passed = registration::verify(state.store.as_ref(), &input.answers).await?;
    Ok(Json(VerifyQuizResponse { passed }))
}
