//! Repository for the `family_questions` table.
//!
//! The public listing and the answer lookup select disjoint column sets into
//! distinct types; no query here returns question text and answer together.

use giapha_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::{NewQuestion, PublicQuestion, QuestionAnswer};

pub struct QuestionRepo;

impl QuestionRepo {
    /// `id, question, hint` of every active question.
    pub async fn list_active_public(pool: &PgPool) -> Result<Vec<PublicQuestion>, sqlx::Error> {
        sqlx::query_as::<_, PublicQuestion>(
            "SELECT id, question, hint FROM family_questions WHERE is_active = TRUE",
        )
        .fetch_all(pool)
        .await
    }

    /// `id, correct_answer` for the given ids, restricted to active rows.
    pub async fn find_active_answers(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<QuestionAnswer>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, QuestionAnswer>(
            "SELECT id, correct_answer FROM family_questions \
             WHERE is_active = TRUE AND id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    pub async fn create(pool: &PgPool, input: &NewQuestion) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO family_questions (question, correct_answer, hint, is_active) \
             VALUES ($1, $2, $3, TRUE) RETURNING id",
        )
        .bind(&input.question)
        .bind(&input.correct_answer)
        .bind(&input.hint)
        .fetch_one(pool)
        .await
    }
}
