use advisory_site_query::{lookup, Document};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::id::DocumentKey;

/// A document as held by a store. `content` is the caller's JSON object;
/// the timestamps are assigned by the store, never by callers.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub key: DocumentKey,
    pub content: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDocument {
    pub fn id(&self) -> &str {
        &self.key.id
    }

    /// API representation: content plus `id`, `createdAt`, `updatedAt`.
    pub fn to_json(&self) -> Value {
        let mut out = self.content.clone();
        out.insert("id".into(), Value::String(self.key.id.clone()));
        out.insert("createdAt".into(), Value::String(format_timestamp(self.created_at)));
        out.insert("updatedAt".into(), Value::String(format_timestamp(self.updated_at)));
        Value::Object(out)
    }
}

impl Document for StoredDocument {
    fn field(&self, path: &str) -> Option<&Value> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let value = self.content.get(head).filter(|v| !v.is_null())?;
        match rest {
            Some(rest) => lookup(value, rest),
            None => Some(value),
        }
    }

    fn created_at_micros(&self) -> i64 {
        self.created_at.timestamp_micros()
    }

    fn updated_at_micros(&self) -> i64 {
        self.updated_at.timestamp_micros()
    }
}

/// RFC 3339 with microseconds, always UTC (`Z`).
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
