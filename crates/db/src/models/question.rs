//! Verification questions for the registration quiz.
//!
//! There is deliberately no model carrying both the question text and the
//! answer: [`PublicQuestion`] is what clients see, [`QuestionAnswer`] is the
//! answer key and is not serializable.

use giapha_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// The client-facing projection of a `family_questions` row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PublicQuestion {
    pub id: DbId,
    pub question: String,
    pub hint: Option<String>,
}

/// The answer-key projection of a `family_questions` row.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionAnswer {
    pub id: DbId,
    pub correct_answer: String,
}

/// DTO for inserting an (always active) question.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub correct_answer: String,
    pub hint: Option<String>,
}
