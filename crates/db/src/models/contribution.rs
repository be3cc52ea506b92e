//! Contribution rows and DTOs.

use giapha_core::contribution::{ContributionStatus, FieldName};
use giapha_core::error::CoreError;
use giapha_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contributions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: DbId,
    pub author_id: DbId,
    pub author_email: String,
    pub field_name: String,
    pub field_label: String,
    pub person_name: Option<String>,
    pub person_handle: Option<String>,
    pub new_value: String,
    pub status: String,
    pub review_note: Option<String>,
    pub created_at: Timestamp,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
}

impl Contribution {
    pub fn status(&self) -> Result<ContributionStatus, CoreError> {
        self.status.parse()
    }

    pub fn field(&self) -> Result<FieldName, CoreError> {
        self.field_name.parse()
    }
}

/// Request body for `POST /contributions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContribution {
    pub field_name: String,
    #[serde(default)]
    pub field_label: String,
    pub new_value: String,
    pub person_name: Option<String>,
    pub person_handle: Option<String>,
}

/// DTO for inserting a validated contribution (always `pending`).
#[derive(Debug, Clone)]
pub struct NewContribution {
    pub author_id: DbId,
    pub author_email: String,
    pub field_name: FieldName,
    pub field_label: String,
    pub person_name: Option<String>,
    pub person_handle: Option<String>,
    pub new_value: String,
}

/// Request body for `PATCH /contributions/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewContribution {
    pub status: ContributionStatus,
    pub review_note: Option<String>,
}

/// Filters for listing contributions.
#[derive(Debug, Clone, Default)]
pub struct ContributionFilter {
    pub status: Option<ContributionStatus>,
    pub author_id: Option<DbId>,
    pub limit: i64,
    pub offset: i64,
}

/// Query parameters for `GET /contributions`.
#[derive(Debug, Deserialize)]
pub struct ContributionListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
