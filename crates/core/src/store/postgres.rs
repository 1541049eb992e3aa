use advisory_site_query::sql::{select_statement, SqlBind};
use advisory_site_query::Query;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{DocumentStore, StoreError, StoreResult};
use crate::document::{DocumentKey, StoredDocument};

const COLUMNS: &str = "collection, id, content, created_at, updated_at";

// Strictly increasing per document, even when the clock has not advanced.
const NEXT_UPDATED_AT: &str = "GREATEST(clock_timestamp(), documents.updated_at + interval '1 microsecond')";

/// PostgreSQL-backed store over the single `documents` table.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn from_row(row: &PgRow) -> StoreResult<StoredDocument> {
    let collection: String = row.try_get("collection")?;
    let id: String = row.try_get("id")?;
    let content: Value = row.try_get("content")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    let key = DocumentKey::new(collection, id);
    let Value::Object(content) = content else {
        return Err(StoreError::Corrupt(key.to_string()));
    };
    Ok(StoredDocument {
        key,
        content,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, key: &DocumentKey) -> StoreResult<Option<StoredDocument>> {
        let sql = format!("SELECT {COLUMNS} FROM documents WHERE collection = $1 AND id = $2");
        let row = sqlx::query(&sql)
            .bind(&key.collection)
            .bind(&key.id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(from_row).transpose()
    }

    async fn insert(&self, collection: &str, content: Map<String, Value>) -> StoreResult<StoredDocument> {
        let sql = format!(
            "INSERT INTO documents (collection, id, content, created_at, updated_at) \
             VALUES ($1, $2, $3, clock_timestamp(), clock_timestamp()) RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(collection)
            .bind(Uuid::now_v7().to_string())
            .bind(Value::Object(content))
            .fetch_one(&self.pool)
            .await?;
        from_row(&row)
    }

    async fn merge(&self, key: &DocumentKey, partial: Map<String, Value>) -> StoreResult<StoredDocument> {
        // jsonb `||` on two objects is a shallow merge: right-hand keys win,
        // arrays are replaced.
        let sql = format!(
            "INSERT INTO documents (collection, id, content, created_at, updated_at) \
             VALUES ($1, $2, $3, clock_timestamp(), clock_timestamp()) \
             ON CONFLICT (collection, id) DO UPDATE \
             SET content = documents.content || EXCLUDED.content, updated_at = {NEXT_UPDATED_AT} \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&key.collection)
            .bind(&key.id)
            .bind(Value::Object(partial))
            .fetch_one(&self.pool)
            .await?;
        from_row(&row)
    }

    async fn update(&self, key: &DocumentKey, partial: Map<String, Value>) -> StoreResult<Option<StoredDocument>> {
        let sql = format!(
            "UPDATE documents SET content = documents.content || $3, updated_at = {NEXT_UPDATED_AT} \
             WHERE collection = $1 AND id = $2 RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&key.collection)
            .bind(&key.id)
            .bind(Value::Object(partial))
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(from_row).transpose()
    }

    async fn replace(&self, key: &DocumentKey, content: Map<String, Value>) -> StoreResult<StoredDocument> {
        let sql = format!(
            "INSERT INTO documents (collection, id, content, created_at, updated_at) \
             VALUES ($1, $2, $3, clock_timestamp(), clock_timestamp()) \
             ON CONFLICT (collection, id) DO UPDATE \
             SET content = EXCLUDED.content, updated_at = {NEXT_UPDATED_AT} \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&key.collection)
            .bind(&key.id)
            .bind(Value::Object(content))
            .fetch_one(&self.pool)
            .await?;
        from_row(&row)
    }

    async fn delete(&self, key: &DocumentKey) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(&key.collection)
            .bind(&key.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn query(&self, query: &Query) -> StoreResult<Vec<StoredDocument>> {
        let statement = select_statement(query);
        let mut q = sqlx::query(&statement.sql);
        for bind in statement.binds {
            q = match bind {
                SqlBind::Json(value) => q.bind(value),
                SqlBind::Text(text) => q.bind(text),
                SqlBind::Path(path) => q.bind(path),
            };
        }
        let rows = q.fetch_all(&self.pool).await?;
        tracing::debug!(collection = %query.collection, rows = rows.len(), "document query");
        rows.iter().map(from_row).collect()
    }
}
