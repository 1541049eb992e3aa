/// Input validation shared by the request-facing services.
use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("content must be a JSON object")]
    NotAnObject,
    #[error("every item in `{field}` needs a non-empty string id")]
    MissingItemId { field: String },
    #[error("duplicate id `{id}` in `{field}`")]
    DuplicateItemId { field: String, id: String },
    #[error("{field}: {reason}")]
    InvalidField { field: String, reason: String },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Reject any field whose value is blank after trimming. Reports every
/// missing field, in the order given.
pub fn require_fields(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Check the list-item invariant on a content object: in every array of
/// objects, each item has a non-empty string `id` unique within that array.
pub fn check_item_ids(content: &Map<String, Value>) -> Result<(), ValidationError> {
    for (field, value) in content {
        let Value::Array(items) = value else { continue };
        if !items.iter().any(Value::is_object) {
            continue;
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in items {
            let id = item
                .get("id")
                .and_then(Value::as_str)
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| ValidationError::MissingItemId {
                    field: field.clone(),
                })?;
            if !seen.insert(id) {
                return Err(ValidationError::DuplicateItemId {
                    field: field.clone(),
                    id: id.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reports_all_missing_fields() {
        let err = require_fields(&[("title", " "), ("slug", "a"), ("excerpt", "")]).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["title", "excerpt"]));
        assert_eq!(err.to_string(), "Missing required fields: title, excerpt");
    }

    #[test]
    fn email_format() {
        assert!(is_valid_email("dana@example.co.il"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@b"));
        assert_eq!(validate_email("x@"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn item_ids_must_be_unique() {
        let ok = json!({"services": [{"id": "a"}, {"id": "b"}], "tags": ["x", "x"]});
        assert!(check_item_ids(ok.as_object().unwrap()).is_ok());

        let dup = json!({"services": [{"id": "a"}, {"id": "a"}]});
        assert_eq!(
            check_item_ids(dup.as_object().unwrap()),
            Err(ValidationError::DuplicateItemId {
                field: "services".into(),
                id: "a".into()
            })
        );

        let missing = json!({"features": [{"title": "no id"}]});
        assert!(matches!(
            check_item_ids(missing.as_object().unwrap()),
            Err(ValidationError::MissingItemId { .. })
        ));
    }
}
