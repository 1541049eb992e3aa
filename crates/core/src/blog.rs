//! Blog posts: public read path and admin management.
//!
//! Public reads only ever see `published` posts. Admin reads see every
//! status. Deletion is permanent.

use std::fmt;
use std::str::FromStr;

use advisory_site_query::{Direction, Filter, OrderKey, Query};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::validate::require_fields;
use crate::document::{collections, DocumentKey, StoredDocument, ValidationError};
use crate::error::{ServiceError, ServiceResult};
use crate::events::{ChangeKind, EventBus};
use crate::image::UploadedImage;
use crate::locale::Locale;
use crate::store::{DocumentStore, SharedStore, StoreError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<UploadedImage>,
    #[serde(default)]
    pub images: Vec<UploadedImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn from_document(doc: &StoredDocument) -> Result<Self, serde_json::Error> {
        serde_json::from_value(doc.to_json())
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Body of an admin create or update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostInput {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub status: Option<String>,
    pub locale: Option<String>,
    pub featured_image: Option<UploadedImage>,
    pub images: Vec<UploadedImage>,
}

/// A post input that passed validation, normalised for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub status: PostStatus,
    pub locale: Locale,
    pub featured_image: Option<UploadedImage>,
    pub images: Vec<UploadedImage>,
}

impl PostInput {
    pub fn validate(self) -> Result<ValidPost, ValidationError> {
        require_fields(&[
            ("title", self.title.as_str()),
            ("slug", self.slug.as_str()),
            ("excerpt", self.excerpt.as_str()),
            ("content", self.content.as_str()),
        ])?;
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => PostStatus::default(),
            Some(s) => s.parse()?,
        };
        let locale = match self.locale.as_deref().map(str::trim) {
            None | Some("") => Locale::DEFAULT,
            Some(code) => Locale::from_code(code)
                .ok_or_else(|| ValidationError::invalid("locale", format!("unsupported locale `{code}`")))?,
        };
        Ok(ValidPost {
            title: self.title.trim().to_string(),
            slug: self.slug.trim().to_lowercase(),
            excerpt: self.excerpt.trim().to_string(),
            content: self.content.trim().to_string(),
            status,
            locale,
            featured_image: self.featured_image,
            images: self.images,
        })
    }
}

impl ValidPost {
    fn into_content(self) -> Result<Map<String, Value>, StoreError> {
        let mut map = Map::new();
        map.insert("title".into(), Value::String(self.title));
        map.insert("slug".into(), Value::String(self.slug));
        map.insert("excerpt".into(), Value::String(self.excerpt));
        map.insert("content".into(), Value::String(self.content));
        map.insert("status".into(), Value::String(self.status.as_str().into()));
        map.insert("locale".into(), Value::String(self.locale.code().into()));
        map.insert(
            "featuredImage".into(),
            match self.featured_image {
                Some(image) => serde_json::to_value(image)?,
                None => Value::Null,
            },
        );
        map.insert("images".into(), serde_json::to_value(self.images)?);
        Ok(map)
    }
}

/// URL slug from a title: lower-case ASCII letters and digits, words joined
/// by single hyphens. Titles with no ASCII letters or digits (e.g. Hebrew)
/// produce an empty slug.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
        }
    }
    slug
}

fn published() -> Filter {
    Filter::eq("status", PostStatus::Published.as_str())
}

/// Posts written before locales existed carry no `locale` and count as the
/// default locale.
fn in_locale(locale: Locale) -> Filter {
    let filter = Filter::eq("locale", locale.code());
    if locale == Locale::DEFAULT {
        filter.or(Filter::defined("locale").negate())
    } else {
        filter
    }
}

#[derive(Clone)]
pub struct BlogService {
    store: Option<SharedStore>,
    events: EventBus,
    default_author: String,
}

impl BlogService {
    pub fn new(store: Option<SharedStore>, events: EventBus, default_author: impl Into<String>) -> Self {
        Self {
            store,
            events,
            default_author: default_author.into(),
        }
    }

    fn store(&self) -> ServiceResult<&SharedStore> {
        self.store.as_ref().ok_or_else(ServiceError::store_not_configured)
    }

    async fn run(&self, query: Query) -> ServiceResult<Vec<BlogPost>> {
        let docs = self.store()?.query(&query).await?;
        Ok(docs
            .iter()
            .filter_map(|doc| match BlogPost::from_document(doc) {
                Ok(post) => Some(post),
                Err(err) => {
                    tracing::warn!(document = %doc.key, error = %err, "skipping malformed blog post");
                    None
                }
            })
            .collect())
    }

    /// Published posts, newest first, optionally limited to one locale and
    /// to posts whose title or excerpt contains `search`.
    pub async fn list_published(&self, locale: Option<Locale>, search: Option<&str>) -> ServiceResult<Vec<BlogPost>> {
        let mut query = Query::collection(collections::BLOG_POSTS)
            .filter(published())
            .order_by(OrderKey::CreatedAt, Direction::Desc);
        if let Some(locale) = locale {
            query = query.filter(in_locale(locale));
        }
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(Filter::contains(["title", "excerpt"], term));
        }
        self.run(query).await
    }

    /// The published post with `slug`, preferring one written in `locale`.
    pub async fn find_published(&self, slug: &str, locale: Option<Locale>) -> ServiceResult<BlogPost> {
        let query = Query::collection(collections::BLOG_POSTS)
            .filter(published())
            .filter(Filter::eq("slug", slug.trim().to_lowercase()))
            .order_by(OrderKey::CreatedAt, Direction::Desc);
        let mut posts = self.run(query).await?;
        let preferred = locale.and_then(|locale| posts.iter().position(|p| p.locale == locale));
        match preferred {
            Some(i) => Ok(posts.swap_remove(i)),
            None if !posts.is_empty() => Ok(posts.swap_remove(0)),
            None => Err(ServiceError::NotFound("Blog post".into())),
        }
    }

    /// Every post regardless of status, newest first.
    pub async fn list_all(&self) -> ServiceResult<Vec<BlogPost>> {
        self.run(Query::collection(collections::BLOG_POSTS).order_by(OrderKey::CreatedAt, Direction::Desc))
            .await
    }

    pub async fn get(&self, id: &str) -> ServiceResult<BlogPost> {
        let doc = self
            .store()?
            .get(&DocumentKey::new(collections::BLOG_POSTS, id))
            .await?
            .ok_or_else(|| ServiceError::NotFound("Blog post".into()))?;
        BlogPost::from_document(&doc).map_err(|e| ServiceError::Store(e.into()))
    }

    async fn ensure_unique_slug(&self, post: &ValidPost, except_id: Option<&str>) -> ServiceResult<()> {
        let query = Query::collection(collections::BLOG_POSTS)
            .filter(Filter::eq("slug", post.slug.as_str()))
            .filter(in_locale(post.locale));
        let clash = self
            .store()?
            .query(&query)
            .await?
            .into_iter()
            .any(|doc| Some(doc.id()) != except_id);
        if clash {
            Err(ServiceError::Conflict(format!(
                "A post with slug `{}` already exists for locale {}",
                post.slug, post.locale
            )))
        } else {
            Ok(())
        }
    }

    /// Create a post. The author is the signed-in admin, or the configured
    /// default author.
    pub async fn create(&self, input: PostInput, author: Option<&str>) -> ServiceResult<BlogPost> {
        let store = self.store()?;
        let post = input.validate()?;
        self.ensure_unique_slug(&post, None).await?;

        let mut content = post.into_content()?;
        let author = author.filter(|a| !a.trim().is_empty()).unwrap_or(self.default_author.as_str());
        content.insert("author".into(), Value::String(author.to_string()));

        let doc = store.insert(collections::BLOG_POSTS, content).await?;
        self.events.document_written(&doc, ChangeKind::Created);
        tracing::info!(post_id = %doc.id(), "blog post created");
        BlogPost::from_document(&doc).map_err(|e| ServiceError::Store(e.into()))
    }

    /// Overwrite the editable fields of a post. Author and creation time are
    /// kept.
    pub async fn update(&self, id: &str, input: PostInput) -> ServiceResult<BlogPost> {
        let store = self.store()?;
        let post = input.validate()?;
        self.ensure_unique_slug(&post, Some(id)).await?;

        let key = DocumentKey::new(collections::BLOG_POSTS, id);
        let doc = store
            .update(&key, post.into_content()?)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Blog post".into()))?;
        self.events.document_written(&doc, ChangeKind::Updated);
        tracing::info!(post_id = %id, "blog post updated");
        BlogPost::from_document(&doc).map_err(|e| ServiceError::Store(e.into()))
    }

    pub async fn set_status(&self, id: &str, status: &str) -> ServiceResult<BlogPost> {
        let store = self.store()?;
        let status: PostStatus = status.parse()?;
        let mut partial = Map::new();
        partial.insert("status".into(), Value::String(status.as_str().into()));

        let key = DocumentKey::new(collections::BLOG_POSTS, id);
        let doc = store
            .update(&key, partial)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Blog post".into()))?;
        self.events.document_written(&doc, ChangeKind::Updated);
        tracing::info!(post_id = %id, %status, "blog post status changed");
        BlogPost::from_document(&doc).map_err(|e| ServiceError::Store(e.into()))
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let store = self.store()?;
        let key = DocumentKey::new(collections::BLOG_POSTS, id);
        if !store.delete(&key).await? {
            return Err(ServiceError::NotFound("Blog post".into()));
        }
        self.events.publish(crate::events::SiteEvent::changed(
            collections::BLOG_POSTS,
            id,
            ChangeKind::Deleted,
            Utc::now(),
        ));
        tracing::info!(post_id = %id, "blog post deleted");
        Ok(())
    }
}
