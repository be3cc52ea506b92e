//! Contribution kinds, statuses, and typed payloads.
//!
//! A contribution stores its payload as an opaque JSON string (`new_value`).
//! [`parse_payload`] turns that string into exactly one [`ContributionPayload`]
//! variant, chosen by the contribution's [`FieldName`]. The same parser runs
//! at submission time and again right before the payload is applied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clan_event::EventType;
use crate::error::CoreError;
use crate::person_columns::{self, PersonFieldValue};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    AddPerson,
    AddEvent,
    AddPost,
    AddQuizQuestion,
    EditPersonField,
}

impl FieldName {
    pub const ALL: [FieldName; 5] = [
        FieldName::AddPerson,
        FieldName::AddEvent,
        FieldName::AddPost,
        FieldName::AddQuizQuestion,
        FieldName::EditPersonField,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::AddPerson => "add_person",
            FieldName::AddEvent => "add_event",
            FieldName::AddPost => "add_post",
            FieldName::AddQuizQuestion => "add_quiz_question",
            FieldName::EditPersonField => "edit_person_field",
        }
    }
}

impl FromStr for FieldName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Loại đóng góp không hợp lệ: '{s}'")))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionStatus {
    Pending,
    Approved,
    Rejected,
}

impl ContributionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContributionStatus::Pending => STATUS_PENDING,
            ContributionStatus::Approved => STATUS_APPROVED,
            ContributionStatus::Rejected => STATUS_REJECTED,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != ContributionStatus::Pending
    }
}

impl FromStr for ContributionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(ContributionStatus::Pending),
            STATUS_APPROVED => Ok(ContributionStatus::Approved),
            STATUS_REJECTED => Ok(ContributionStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Trạng thái không hợp lệ: '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reviewer may only move a contribution out of `pending`, and only to a
/// terminal state.
pub fn validate_review_target(target: ContributionStatus) -> Result<(), CoreError> {
    if target.is_terminal() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Chỉ có thể duyệt hoặc từ chối đóng góp".into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Maximum length of free text fields in payloads (characters).
pub const MAX_TEXT_LEN: usize = 10_000;
/// Maximum length of names and titles (characters).
pub const MAX_NAME_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPersonPayload {
    pub display_name: String,
    pub gender: i32,
    pub generation: i32,
    pub birth_year: Option<i32>,
    pub birth_month: Option<i32>,
    pub birth_day: Option<i32>,
    pub death_year: Option<i32>,
    pub is_living: Option<bool>,
    pub occupation: Option<String>,
    pub current_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub relation_hint: Option<String>,
    pub spouse_handle: Option<String>,
}

impl AddPersonPayload {
    /// Living unless stated otherwise; a known death year implies deceased.
    pub fn resolved_is_living(&self) -> bool {
        if self.death_year.is_some() {
            false
        } else {
            self.is_living.unwrap_or(true)
        }
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_text("displayName", &self.display_name, MAX_NAME_LEN)?;
        if !(1..=2).contains(&self.gender) {
            return Err(invalid("gender"));
        }
        if !(1..=200).contains(&self.generation) {
            return Err(invalid("generation"));
        }
        check_range("birthYear", self.birth_year, 1, 9999)?;
        check_range("birthMonth", self.birth_month, 1, 12)?;
        check_range("birthDay", self.birth_day, 1, 31)?;
        check_range("deathYear", self.death_year, 1, 9999)?;
        if let (Some(birth), Some(death)) = (self.birth_year, self.death_year) {
            if death < birth {
                return Err(CoreError::Validation(
                    "Năm mất không thể trước năm sinh".into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEventPayload {
    pub title: String,
    pub start_at: Timestamp,
    pub end_at: Option<Timestamp>,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

impl AddEventPayload {
    pub fn normalized_type(&self) -> EventType {
        EventType::normalize(self.event_type.as_deref())
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title, MAX_NAME_LEN)?;
        if let Some(end) = self.end_at {
            if end < self.start_at {
                return Err(CoreError::Validation(
                    "Thời gian kết thúc phải sau thời gian bắt đầu".into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPostPayload {
    pub content: String,
    pub title: Option<String>,
}

impl AddPostPayload {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("content", &self.content, MAX_TEXT_LEN)?;
        if let Some(title) = &self.title {
            if title.chars().count() > MAX_NAME_LEN {
                return Err(invalid("title"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuizQuestionPayload {
    pub question: String,
    pub correct_answer: String,
    pub hint: Option<String>,
}

impl AddQuizQuestionPayload {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("question", &self.question, MAX_TEXT_LEN)?;
        require_text("correctAnswer", &self.correct_answer, MAX_NAME_LEN)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPersonFieldPayload {
    pub db_column: String,
    pub label: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl EditPersonFieldPayload {
    /// Resolve the whitelisted column and the coerced value.
    ///
    /// Called at submission and again at apply time.
    pub fn resolve(&self) -> Result<(&'static str, PersonFieldValue), CoreError> {
        let column = person_columns::lookup(&self.db_column)?;
        let value = column.coerce(&self.value)?;
        Ok((column.name, value))
    }
}

/// A parsed contribution payload; exactly one variant per [`FieldName`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContributionPayload {
    AddPerson(AddPersonPayload),
    AddEvent(AddEventPayload),
    AddPost(AddPostPayload),
    AddQuizQuestion(AddQuizQuestionPayload),
    EditPersonField(EditPersonFieldPayload),
}

impl ContributionPayload {
    pub fn field_name(&self) -> FieldName {
        match self {
            ContributionPayload::AddPerson(_) => FieldName::AddPerson,
            ContributionPayload::AddEvent(_) => FieldName::AddEvent,
            ContributionPayload::AddPost(_) => FieldName::AddPost,
            ContributionPayload::AddQuizQuestion(_) => FieldName::AddQuizQuestion,
            ContributionPayload::EditPersonField(_) => FieldName::EditPersonField,
        }
    }
}

/// Parse and validate `raw` as the payload shape of `field_name`.
pub fn parse_payload(field_name: FieldName, raw: &str) -> Result<ContributionPayload, CoreError> {
    fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, CoreError> {
        serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("Dữ liệu đóng góp không hợp lệ: {e}")))
    }

    let payload = match field_name {
        FieldName::AddPerson => {
            let p: AddPersonPayload = decode(raw)?;
            p.validate()?;
            ContributionPayload::AddPerson(p)
        }
        FieldName::AddEvent => {
            let p: AddEventPayload = decode(raw)?;
            p.validate()?;
            ContributionPayload::AddEvent(p)
        }
        FieldName::AddPost => {
            let p: AddPostPayload = decode(raw)?;
            p.validate()?;
            ContributionPayload::AddPost(p)
        }
        FieldName::AddQuizQuestion => {
            let p: AddQuizQuestionPayload = decode(raw)?;
            p.validate()?;
            ContributionPayload::AddQuizQuestion(p)
        }
        FieldName::EditPersonField => {
            let p: EditPersonFieldPayload = decode(raw)?;
            p.resolve()?;
            ContributionPayload::EditPersonField(p)
        }
    };
    Ok(payload)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid(field: &str) -> CoreError {
    CoreError::Validation(format!("Trường '{field}' không hợp lệ"))
}

fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!(
            "Trường '{field}' không được để trống"
        )));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "Trường '{field}' vượt quá {max_len} ký tự"
        )));
    }
    Ok(())
}

fn check_range(field: &str, value: Option<i32>, min: i32, max: i32) -> Result<(), CoreError> {
    match value {
        Some(v) if v < min || v > max => Err(invalid(field)),
        _ => Ok(()),
    }
}
