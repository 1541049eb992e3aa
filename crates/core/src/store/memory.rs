use std::collections::BTreeMap;
use std::sync::Arc;

use advisory_site_query::{execute, Query};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{next_timestamp, DocumentStore, StoreResult};
use crate::document::{DocumentKey, StoredDocument};

/// In-process store. Cloning shares the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    docs: BTreeMap<DocumentKey, StoredDocument>,
    // Store-wide clock so that timestamps never repeat, even across
    // documents written in the same microsecond.
    last_stamp: Option<DateTime<Utc>>,
}

impl Inner {
    fn stamp(&mut self) -> DateTime<Utc> {
        let ts = next_timestamp(self.last_stamp);
        self.last_stamp = Some(ts);
        ts
    }
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.docs.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, key: &DocumentKey) -> StoreResult<Option<StoredDocument>> {
        Ok(self.inner.read().await.docs.get(key).cloned())
    }

    async fn insert(&self, collection: &str, content: Map<String, Value>) -> StoreResult<StoredDocument> {
        let mut inner = self.inner.write().await;
        let now = inner.stamp();
        let doc = StoredDocument {
            key: DocumentKey::generate(collection),
            content,
            created_at: now,
            updated_at: now,
        };
        inner.docs.insert(doc.key.clone(), doc.clone());
        Ok(doc)
    }

    async fn merge(&self, key: &DocumentKey, partial: Map<String, Value>) -> StoreResult<StoredDocument> {
        let mut inner = self.inner.write().await;
        let now = inner.stamp();
        let doc = inner.docs.entry(key.clone()).or_insert_with(|| StoredDocument {
            key: key.clone(),
            content: Map::new(),
            created_at: now,
            updated_at: now,
        });
        doc.content.extend(partial);
        doc.updated_at = now;
        Ok(doc.clone())
    }

    async fn update(&self, key: &DocumentKey, partial: Map<String, Value>) -> StoreResult<Option<StoredDocument>> {
        let mut inner = self.inner.write().await;
        if !inner.docs.contains_key(key) {
            return Ok(None);
        }
        let now = inner.stamp();
        Ok(inner.docs.get_mut(key).map(|doc| {
            doc.content.extend(partial);
            doc.updated_at = now;
            doc.clone()
        }))
    }

    async fn replace(&self, key: &DocumentKey, content: Map<String, Value>) -> StoreResult<StoredDocument> {
        let mut inner = self.inner.write().await;
        let now = inner.stamp();
        let created_at = inner.docs.get(key).map_or(now, |d| d.created_at);
        let doc = StoredDocument {
            key: key.clone(),
            content,
            created_at,
            updated_at: now,
        };
        inner.docs.insert(key.clone(), doc.clone());
        Ok(doc)
    }

    async fn delete(&self, key: &DocumentKey) -> StoreResult<bool> {
        Ok(self.inner.write().await.docs.remove(key).is_some())
    }

    async fn query(&self, query: &Query) -> StoreResult<Vec<StoredDocument>> {
        let inner = self.inner.read().await;
        let in_collection = inner
            .docs
            .values()
            .filter(|doc| doc.key.collection == query.collection);
        Ok(execute(query, in_collection))
    }
}
