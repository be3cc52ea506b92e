//! Registration gate: the quiz a prospective member must pass.

use std::collections::HashMap;

use giapha_core::quiz::{self, SubmittedAnswer, MAX_QUIZ_QUESTIONS};
use giapha_core::types::DbId;
use giapha_db::models::question::PublicQuestion;
use giapha_db::Store;

use crate::error::PipelineResult;

/// Up to three active questions, drawn at random, without answers.
pub async fn fetch_questions(store: &dyn Store) -> PipelineResult<Vec<PublicQuestion>> {
    let active = store.list_active_questions().await?;
    Ok(quiz::sample(active, MAX_QUIZ_QUESTIONS))
}

/// Whether every submitted answer is correct. An empty submission fails.
pub async fn verify(store: &dyn Store, answers: &[SubmittedAnswer]) -> PipelineResult<bool> {
    if answers.is_empty() {
        return Ok(false);
    }

    let mut ids: Vec<DbId> = answers.iter().map(|a| a.question_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let answer_key: HashMap<DbId, String> = store
        .find_active_answers(&ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a.correct_answer))
        .collect();

    let passed = quiz::grade(answers, &answer_key);
    tracing::info!(answered = answers.len(), passed, "Registration quiz graded");
    Ok(passed)
}
