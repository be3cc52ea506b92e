//! Whitelist of `people` columns that a contribution may edit.
//!
//! Column names arriving in contribution payloads are attacker-controlled.
//! Only names listed here ever reach SQL, and each value is coerced to the
//! column's type before binding.

use serde_json::Value;

use crate::error::CoreError;

/// The storage type of an editable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text { nullable: bool },
    Integer { min: i32, max: i32, nullable: bool },
    Boolean,
}

/// An editable `people` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonColumn {
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// A value already coerced to the column's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonFieldValue {
    Text(Option<String>),
    Integer(Option<i32>),
    Boolean(bool),
}

const fn text(name: &'static str, nullable: bool) -> PersonColumn {
    PersonColumn {
        name,
        kind: ColumnKind::Text { nullable },
    }
}

const fn int(name: &'static str, min: i32, max: i32, nullable: bool) -> PersonColumn {
    PersonColumn {
        name,
        kind: ColumnKind::Integer { min, max, nullable },
    }
}

pub const ALLOWED_PERSON_COLUMNS: &[PersonColumn] = &[
    text("display_name", false),
    int("gender", 1, 2, false),
    int("generation", 1, 200, false),
    int("birth_year", 1, 9999, true),
    int("birth_month", 1, 12, true),
    int("birth_day", 1, 31, true),
    int("death_year", 1, 9999, true),
    int("death_month", 1, 12, true),
    int("death_day", 1, 31, true),
    PersonColumn {
        name: "is_living",
        kind: ColumnKind::Boolean,
    },
    text("occupation", true),
    text("current_address", true),
    text("hometown", true),
    text("phone", true),
    text("email", true),
    text("education", true),
    text("biography", true),
    text("nick_name", true),
];

/// Maximum length of a text value written through a field edit.
pub const MAX_TEXT_VALUE_LEN: usize = 5_000;

/// Look up a column by name, rejecting anything outside the whitelist.
pub fn lookup(name: &str) -> Result<&'static PersonColumn, CoreError> {
    ALLOWED_PERSON_COLUMNS
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| CoreError::Validation(format!("Không được phép sửa trường '{name}'")))
}

impl PersonColumn {
    /// Coerce a JSON value to this column's type.
    pub fn coerce(&self, value: &Value) -> Result<PersonFieldValue, CoreError> {
        let invalid = || {
            CoreError::Validation(format!("Giá trị không hợp lệ cho trường '{}'", self.name))
        };

        match self.kind {
            ColumnKind::Text { nullable } => {
                let raw = match value {
                    Value::Null => None,
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => return Err(invalid()),
                };
                match raw {
                    Some(s) if s.chars().count() > MAX_TEXT_VALUE_LEN => Err(invalid()),
                    Some(s) if !s.is_empty() => Ok(PersonFieldValue::Text(Some(s))),
                    _ if nullable => Ok(PersonFieldValue::Text(None)),
                    _ => Err(invalid()),
                }
            }
            ColumnKind::Integer { min, max, nullable } => {
                let parsed = match value {
                    Value::Null => None,
                    Value::Number(n) => Some(n.as_i64().ok_or_else(invalid)?),
                    Value::String(s) if s.trim().is_empty() => None,
                    Value::String(s) => Some(s.trim().parse::<i64>().map_err(|_| invalid())?),
                    _ => return Err(invalid()),
                };
                match parsed {
                    Some(n) if n >= i64::from(min) && n <= i64::from(max) => {
                        // Range check above guarantees the cast is lossless.
                        Ok(PersonFieldValue::Integer(Some(n as i32)))
                    }
                    Some(_) => Err(invalid()),
                    None if nullable => Ok(PersonFieldValue::Integer(None)),
                    None => Err(invalid()),
                }
            }
            ColumnKind::Boolean => match value {
                Value::Bool(b) => Ok(PersonFieldValue::Boolean(*b)),
                Value::String(s) => match s.trim() {
                    "true" => Ok(PersonFieldValue::Boolean(true)),
                    "false" => Ok(PersonFieldValue::Boolean(false)),
                    _ => Err(invalid()),
                },
                _ => Err(invalid()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whitelist_has_eighteen_unique_columns() {
        assert_eq!(ALLOWED_PERSON_COLUMNS.len(), 18);
        let mut names: Vec<_> = ALLOWED_PERSON_COLUMNS.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 18);
    }

    #[test]
    fn lookup_rejects_columns_outside_whitelist() {
        assert!(lookup("occupation").is_ok());
        for bad in ["handle", "id", "avatar_url", "role", "display_name; DROP TABLE people", ""] {
            assert!(lookup(bad).is_err(), "{bad} must be rejected");
        }
    }

    #[test]
    fn text_values_are_trimmed_and_blank_clears_nullable() {
        let col = lookup("occupation").unwrap();
        assert_eq!(
            col.coerce(&json!("  Giáo viên ")).unwrap(),
            PersonFieldValue::Text(Some("Giáo viên".into()))
        );
        assert_eq!(col.coerce(&json!("")).unwrap(), PersonFieldValue::Text(None));
        assert_eq!(col.coerce(&json!(null)).unwrap(), PersonFieldValue::Text(None));
    }

    #[test]
    fn non_nullable_text_rejects_blank() {
        let col = lookup("display_name").unwrap();
        assert!(col.coerce(&json!("   ")).is_err());
    }

    #[test]
    fn integers_accept_numbers_and_numeric_strings_in_range() {
        let col = lookup("birth_year").unwrap();
        assert_eq!(
            col.coerce(&json!(1945)).unwrap(),
            PersonFieldValue::Integer(Some(1945))
        );
        assert_eq!(
            col.coerce(&json!(" 1950 ")).unwrap(),
            PersonFieldValue::Integer(Some(1950))
        );
        assert!(col.coerce(&json!(0)).is_err());
        assert!(col.coerce(&json!("năm")).is_err());
        assert!(col.coerce(&json!(1.5)).is_err());
    }

    #[test]
    fn gender_is_one_or_two() {
        let col = lookup("gender").unwrap();
        assert!(col.coerce(&json!(1)).is_ok());
        assert!(col.coerce(&json!(3)).is_err());
        assert!(col.coerce(&json!(null)).is_err());
    }

    #[test]
    fn booleans_accept_literals_only() {
        let col = lookup("is_living").unwrap();
        assert_eq!(col.coerce(&json!(false)).unwrap(), PersonFieldValue::Boolean(false));
        assert_eq!(col.coerce(&json!("true")).unwrap(), PersonFieldValue::Boolean(true));
        assert!(col.coerce(&json!(1)).is_err());
    }
}
