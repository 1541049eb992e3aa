//! Addressing a single editable field inside a section document.
//!
//! A path is either a top-level field (`sectionTitle`) or a field of one
//! list item located by its id (`services.strategy.title`). Item ids are the
//! stable identity of list elements; positions are never used.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::document::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    Field(String),
    Item {
        list: String,
        item_id: String,
        field: String,
    },
}

impl FieldPath {
    pub fn field(name: impl Into<String>) -> Self {
        FieldPath::Field(name.into())
    }

    pub fn item(list: impl Into<String>, item_id: impl Into<String>, field: impl Into<String>) -> Self {
        FieldPath::Item {
            list: list.into(),
            item_id: item_id.into(),
            field: field.into(),
        }
    }

    /// Compute the full replacement value of the top-level field after
    /// writing `value` at this path.
    pub fn apply(&self, content: &Map<String, Value>, value: Value) -> Result<(String, Value), ValidationError> {
        match self {
            FieldPath::Field(name) => {
                if name == "id" || name == "updatedAt" {
                    return Err(ValidationError::invalid(name.as_str(), "field is managed by the server"));
                }
                Ok((name.clone(), value))
            }
            FieldPath::Item { list, item_id, field } => {
                if field == "id" {
                    return Err(ValidationError::invalid(self.to_string(), "item ids cannot be edited"));
                }
                let mut items = content
                    .get(list)
                    .and_then(Value::as_array)
                    .cloned()
                    .ok_or_else(|| ValidationError::invalid(list.as_str(), "not a list"))?;
                let item = items
                    .iter_mut()
                    .find(|item| item_id_of(item) == Some(item_id.as_str()))
                    .and_then(Value::as_object_mut)
                    .ok_or_else(|| ValidationError::invalid(self.to_string(), "no item with that id"))?;
                item.insert(field.clone(), value);
                Ok((list.clone(), Value::Array(items)))
            }
        }
    }
}

fn item_id_of(item: &Value) -> Option<&str> {
    item.get("id").and_then(Value::as_str)
}

impl FromStr for FieldPath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(ValidationError::invalid("path", format!("malformed field path `{s}`")));
        }
        match parts.as_slice() {
            [field] => Ok(FieldPath::field(*field)),
            [list, item_id, field] => Ok(FieldPath::item(*list, *item_id, *field)),
            _ => Err(ValidationError::invalid(
                "path",
                format!("expected `field` or `list.itemId.field`, got `{s}`"),
            )),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Field(name) => f.write_str(name),
            FieldPath::Item { list, item_id, field } => write!(f, "{list}.{item_id}.{field}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn services() -> Map<String, Value> {
        json!({
            "sectionTitle": "Our Services",
            "services": [
                {"id": "investment", "title": "Investment Advisory"},
                {"id": "strategy", "title": "Business Strategy"}
            ]
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn parses_both_forms() {
        assert_eq!("sectionTitle".parse::<FieldPath>().unwrap(), FieldPath::field("sectionTitle"));
        assert_eq!(
            "services.strategy.title".parse::<FieldPath>().unwrap(),
            FieldPath::item("services", "strategy", "title")
        );
        assert!("a.b".parse::<FieldPath>().is_err());
        assert!("services..title".parse::<FieldPath>().is_err());
    }

    #[test]
    fn item_write_replaces_only_the_matching_element() {
        let path = FieldPath::item("services", "strategy", "title");
        let (field, value) = path.apply(&services(), json!("Strategy & Growth")).unwrap();

        assert_eq!(field, "services");
        assert_eq!(value[0]["title"], "Investment Advisory");
        assert_eq!(value[1]["title"], "Strategy & Growth");
        assert_eq!(value[1]["id"], "strategy");
    }

    #[test]
    fn unknown_item_is_rejected() {
        let path = FieldPath::item("services", "missing", "title");
        assert!(path.apply(&services(), json!("x")).is_err());
    }

    #[test]
    fn parsed_paths_address_items_by_id() {
        let path: FieldPath = "services.investment.title".parse().unwrap();
        assert_eq!(path, FieldPath::item("services", "investment", "title"));
        assert_eq!(path.to_string(), "services.investment.title");
        let (_, value) = path.apply(&services(), json!("Investments")).unwrap();
        assert_eq!(value[0]["title"], "Investments");
    }
}
