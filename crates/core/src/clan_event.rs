//! Clan event types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Memorial,
    Meeting,
    Festival,
    Other,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Memorial => "MEMORIAL",
            EventType::Meeting => "MEETING",
            EventType::Festival => "FESTIVAL",
            EventType::Other => "OTHER",
        }
    }

    /// Map free-form input onto a known type. Unrecognized or missing values
    /// become [`EventType::Other`].
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
            Some("MEMORIAL") => EventType::Memorial,
            Some("MEETING") => EventType::Meeting,
            Some("FESTIVAL") => EventType::Festival,
            _ => EventType::Other,
        }
    }
}
