//! Document persistence.
//!
//! [`DocumentStore`] is the only seam between the services and the backing
//! database. Writes are last-write-wins: there is no revision check and no
//! transaction spanning more than one document.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use advisory_site_query::Query;
use async_trait::async_trait;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::document::{DocumentKey, StoredDocument};

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("document {0} does not hold a JSON object")]
    Corrupt(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Shared handle injected into services.
pub type SharedStore = Arc<dyn DocumentStore>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, key: &DocumentKey) -> StoreResult<Option<StoredDocument>>;

    /// Create a document under a freshly generated id.
    async fn insert(&self, collection: &str, content: Map<String, Value>) -> StoreResult<StoredDocument>;

    /// Upsert with a shallow, field-level merge. Arrays in `partial` replace
    /// the stored arrays wholesale.
    async fn merge(&self, key: &DocumentKey, partial: Map<String, Value>) -> StoreResult<StoredDocument>;

    /// Like [`merge`](Self::merge) but only when the document already exists.
    async fn update(&self, key: &DocumentKey, partial: Map<String, Value>) -> StoreResult<Option<StoredDocument>>;

    /// Overwrite the whole content, keeping the creation time.
    async fn replace(&self, key: &DocumentKey, content: Map<String, Value>) -> StoreResult<StoredDocument>;

    async fn delete(&self, key: &DocumentKey) -> StoreResult<bool>;

    async fn query(&self, query: &Query) -> StoreResult<Vec<StoredDocument>>;
}

/// Next server timestamp: now, truncated to the database's microsecond
/// precision, but always strictly after `previous`.
pub(crate) fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now().trunc_subsecs(6);
    match previous {
        Some(prev) if now <= prev => prev + Duration::microseconds(1),
        _ => now,
    }
}

/// Turn an arbitrary JSON value into document content.
pub fn into_content(value: Value) -> Result<Map<String, Value>, crate::document::ValidationError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(crate::document::ValidationError::NotAnObject),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A store whose every call fails, for exercising degraded paths.
    pub(crate) struct UnavailableStore;

    fn down<T>() -> StoreResult<T> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    #[async_trait]
    impl DocumentStore for UnavailableStore {
        async fn get(&self, _: &DocumentKey) -> StoreResult<Option<StoredDocument>> {
            down()
        }
        async fn insert(&self, _: &str, _: Map<String, Value>) -> StoreResult<StoredDocument> {
            down()
        }
        async fn merge(&self, _: &DocumentKey, _: Map<String, Value>) -> StoreResult<StoredDocument> {
            down()
        }
        async fn update(&self, _: &DocumentKey, _: Map<String, Value>) -> StoreResult<Option<StoredDocument>> {
            down()
        }
        async fn replace(&self, _: &DocumentKey, _: Map<String, Value>) -> StoreResult<StoredDocument> {
            down()
        }
        async fn delete(&self, _: &DocumentKey) -> StoreResult<bool> {
            down()
        }
        async fn query(&self, _: &Query) -> StoreResult<Vec<StoredDocument>> {
            down()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_never_go_backwards() {
        let future = Utc::now() + Duration::seconds(60);
        let next = next_timestamp(Some(future));
        assert_eq!(next, future + Duration::microseconds(1));

        let a = next_timestamp(None);
        let b = next_timestamp(Some(a));
        assert!(b > a);
    }

    #[test]
    fn content_must_be_object() {
        assert!(into_content(serde_json::json!({"a": 1})).is_ok());
        assert!(into_content(serde_json::json!([1])).is_err());
    }
}
