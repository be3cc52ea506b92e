//! People and family rows.

use giapha_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `people` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub handle: String,
    pub display_name: String,
    pub gender: i32,
    pub generation: i32,
    pub birth_year: Option<i32>,
    pub birth_month: Option<i32>,
    pub birth_day: Option<i32>,
    pub death_year: Option<i32>,
    pub death_month: Option<i32>,
    pub death_day: Option<i32>,
    pub is_living: bool,
    pub occupation: Option<String>,
    pub current_address: Option<String>,
    pub hometown: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub education: Option<String>,
    pub biography: Option<String>,
    pub nick_name: Option<String>,
    pub notes: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a person. The handle is derived by the caller.
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub handle: String,
    pub display_name: String,
    pub gender: i32,
    pub generation: i32,
    pub birth_year: Option<i32>,
    pub birth_month: Option<i32>,
    pub birth_day: Option<i32>,
    pub death_year: Option<i32>,
    pub is_living: bool,
    pub occupation: Option<String>,
    pub current_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// A row from the `families` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Family {
    pub id: DbId,
    pub handle: String,
    pub father_handle: Option<String>,
    pub mother_handle: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a family.
#[derive(Debug, Clone)]
pub struct NewFamily {
    pub handle: String,
    pub father_handle: Option<String>,
    pub mother_handle: Option<String>,
}
