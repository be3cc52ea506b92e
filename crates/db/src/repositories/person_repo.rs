//! Repository for the `people` and `families` tables.

use giapha_core::error::CoreError;
use giapha_core::person_columns::{self, PersonFieldValue};
use sqlx::PgPool;

use crate::models::person::{Family, NewFamily, NewPerson, Person};

/// Column list for `people` queries.
const COLUMNS: &str = "\
    id, handle, display_name, gender, generation, \
    birth_year, birth_month, birth_day, death_year, death_month, death_day, \
    is_living, occupation, current_address, hometown, phone, email, \
    education, biography, nick_name, notes, avatar_url, created_at, updated_at";

/// Column list for `families` queries.
const FAMILY_COLUMNS: &str = "id, handle, father_handle, mother_handle, created_at";

pub struct PersonRepo;

impl PersonRepo {
    pub async fn create(pool: &PgPool, input: &NewPerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO people \
                (handle, display_name, gender, generation, birth_year, birth_month, \
                 birth_day, death_year, is_living, occupation, current_address, \
                 phone, email, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.handle)
            .bind(&input.display_name)
            .bind(input.gender)
            .bind(input.generation)
            .bind(input.birth_year)
            .bind(input.birth_month)
            .bind(input.birth_day)
            .bind(input.death_year)
            .bind(input.is_living)
            .bind(&input.occupation)
            .bind(&input.current_address)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_handle(pool: &PgPool, handle: &str) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE handle = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(handle)
            .fetch_optional(pool)
            .await
    }

    /// Update a single column. `column` must be on the editable whitelist;
    /// it is checked again here because it is interpolated into the SQL.
    pub async fn update_field(
        pool: &PgPool,
        handle: &str,
        column: &str,
        value: &PersonFieldValue,
    ) -> Result<bool, UpdateFieldError> {
        let column = person_columns::lookup(column)?.name;
        let query =
            format!("UPDATE people SET {column} = $2, updated_at = NOW() WHERE handle = $1");
        let base = sqlx::query(&query).bind(handle);
        let bound = match value {
            PersonFieldValue::Text(v) => base.bind(v.clone()),
            PersonFieldValue::Integer(v) => base.bind(*v),
            PersonFieldValue::Boolean(v) => base.bind(*v),
        };
        let result = bound.execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_avatar_url(
        pool: &PgPool,
        handle: &str,
        url: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE people SET avatar_url = $2, updated_at = NOW() WHERE handle = $1",
        )
        .bind(handle)
        .bind(url)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_living_with_birthdays(pool: &PgPool) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM people \
             WHERE is_living = TRUE AND birth_month IS NOT NULL AND birth_day IS NOT NULL \
             ORDER BY display_name"
        );
        sqlx::query_as::<_, Person>(&query).fetch_all(pool).await
    }

    pub async fn create_family(pool: &PgPool, input: &NewFamily) -> Result<Family, sqlx::Error> {
        let query = format!(
            "INSERT INTO families (handle, father_handle, mother_handle) \
             VALUES ($1, $2, $3) \
             RETURNING {FAMILY_COLUMNS}"
        );
        sqlx::query_as::<_, Family>(&query)
            .bind(&input.handle)
            .bind(&input.father_handle)
            .bind(&input.mother_handle)
            .fetch_one(pool)
            .await
    }
}

/// Failure of [`PersonRepo::update_field`]: either the column was refused
/// before any SQL ran, or the statement itself failed.
#[derive(Debug, thiserror::Error)]
pub enum UpdateFieldError {
    #[error(transparent)]
    Rejected(#[from] CoreError),
    #[error(transparent)]
    Sql(#[from] sqlx::Error),
}
