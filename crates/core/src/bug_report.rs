//! Bug report triage states and input limits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BugStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl BugStatus {
    pub const ALL: [BugStatus; 4] = [
        BugStatus::Open,
        BugStatus::InProgress,
        BugStatus::Resolved,
        BugStatus::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BugStatus::Open => "open",
            BugStatus::InProgress => "in_progress",
            BugStatus::Resolved => "resolved",
            BugStatus::Closed => "closed",
        }
    }

    /// Work starts or the report is dismissed; fixed reports can be reopened
    /// into progress, and closed ones only back to open.
    pub fn can_become(self, next: BugStatus) -> bool {
        use BugStatus::*;
        matches!(
            (self, next),
            (Open, InProgress)
                | (Open, Closed)
                | (InProgress, Resolved)
                | (InProgress, Closed)
                | (Resolved, Closed)
                | (Resolved, InProgress)
                | (Closed, Open)
        )
    }

    pub fn ensure_can_become(self, next: BugStatus) -> Result<(), CoreError> {
        if self.can_become(next) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Không thể chuyển báo lỗi từ '{self}' sang '{next}'"
            )))
        }
    }
}

impl FromStr for BugStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BugStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!("Trạng thái báo lỗi không hợp lệ: '{s}'"))
            })
    }
}

impl fmt::Display for BugStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title is required; both fields are bounded in characters, not bytes.
pub fn validate_report(title: &str, description: Option<&str>) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Tiêu đề không được để trống".into()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(CoreError::Validation(format!(
            "Tiêu đề vượt quá {MAX_TITLE_CHARS} ký tự"
        )));
    }
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_CHARS) {
        return Err(CoreError::Validation(format!(
            "Mô tả vượt quá {MAX_DESCRIPTION_CHARS} ký tự"
        )));
    }
    Ok(())
}
