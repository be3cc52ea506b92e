//! Registration quiz: question sampling and answer grading.
//!
//! Grading never sees the question text and the sampling path never sees the
//! answers; the repository layer exposes the two projections separately.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Number of questions presented to a prospective member.
pub const MAX_QUIZ_QUESTIONS: usize = 3;

/// One answer submitted by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: DbId,
    pub answer: String,
}

/// Trim surrounding whitespace and case-fold.
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Compare a submitted answer against the stored one.
pub fn answer_matches(submitted: &str, expected: &str) -> bool {
    normalize_answer(submitted) == normalize_answer(expected)
}

/// Grade a submission against the answer key of *active* questions.
///
/// Passes only when at least one answer was submitted and every answer
/// matches. An id missing from `answer_key` (unknown or inactive question)
/// counts as a wrong answer.
pub fn grade(answers: &[SubmittedAnswer], answer_key: &HashMap<DbId, String>) -> bool {
    if answers.is_empty() {
        return false;
    }
    answers.iter().all(|a| {
        answer_key
            .get(&a.question_id)
            .is_some_and(|expected| answer_matches(&a.answer, expected))
    })
}

/// Pick up to `count` items uniformly at random without replacement.
pub fn sample<T>(mut items: Vec<T>, count: usize) -> Vec<T> {
    items.shuffle(&mut rand::rng());
    items.truncate(count);
    items
}
