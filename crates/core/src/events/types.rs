use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events emitted after successful writes, consumed by SSE listeners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SiteEvent {
    Welcome,
    DocumentChanged(DocumentChange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChange {
    pub collection: String,
    pub document_id: String,
    pub change: ChangeKind,
    pub timestamp: DateTime<Utc>,
}

impl SiteEvent {
    pub fn changed(collection: &str, document_id: &str, change: ChangeKind, timestamp: DateTime<Utc>) -> Self {
        SiteEvent::DocumentChanged(DocumentChange {
            collection: collection.to_string(),
            document_id: document_id.to_string(),
            change,
            timestamp,
        })
    }

    /// SSE `event:` name.
    pub fn name(&self) -> &'static str {
        match self {
            SiteEvent::Welcome => "welcome",
            SiteEvent::DocumentChanged(_) => "documentChanged",
        }
    }
}
