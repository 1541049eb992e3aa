//! Section content: load-with-defaults and merge-on-write for every editable
//! block of the public site.
//!
//! Each section lives in `site_content` under either a per-locale key
//! (`about_he`) or a shared key (`privacy`). Reads never fail: a missing
//! document, an unconfigured store or a read error all yield the default
//! content for that section and locale.

pub mod binding;
pub mod defaults;
pub mod models;
pub mod sections;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::document::model::format_timestamp;
use crate::document::validate::check_item_ids;
use crate::document::{DocumentKey, StoredDocument, ValidationError};
use crate::error::{ServiceError, ServiceResult};
use crate::events::{ChangeKind, EventBus};
use crate::locale::Locale;
use crate::store::{DocumentStore, SharedStore};

pub use binding::FieldPath;
pub use models::*;

/// Keys a client may send but the server owns.
const MANAGED_KEYS: &[&str] = &["id", "createdAt", "updatedAt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    About,
    Services,
    Clients,
    Testimonials,
    Landing,
    Privacy,
    PageSections,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Hero,
        Section::About,
        Section::Services,
        Section::Clients,
        Section::Testimonials,
        Section::Landing,
        Section::Privacy,
        Section::PageSections,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::About => "about",
            Section::Services => "services",
            Section::Clients => "clients",
            Section::Testimonials => "testimonials",
            Section::Landing => "landing",
            Section::Privacy => "privacy",
            Section::PageSections => "page_sections",
        }
    }

    /// Whether each locale has its own document.
    pub fn is_localized(self) -> bool {
        !matches!(self, Section::Clients | Section::Privacy | Section::PageSections)
    }

    pub fn key(self, locale: Locale) -> DocumentKey {
        if self.is_localized() {
            DocumentKey::localized_content(self.name(), locale)
        } else {
            DocumentKey::shared_content(self.name())
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        Section::ALL
            .into_iter()
            .find(|section| section.name() == normalized)
            .ok_or_else(|| ValidationError::invalid("section", format!("unknown section `{s}`")))
    }
}

/// The result of loading a section: its content and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSnapshot {
    pub key: DocumentKey,
    pub content: Map<String, Value>,
    /// False when the content is the synthesised default.
    pub persisted: bool,
    pub updated_at: DateTime<Utc>,
}

impl ContentSnapshot {
    fn from_document(doc: StoredDocument) -> Self {
        Self {
            key: doc.key,
            content: doc.content,
            persisted: true,
            updated_at: doc.updated_at,
        }
    }

    fn from_defaults(section: Section, locale: Locale) -> Self {
        Self {
            key: section.key(locale),
            content: defaults::for_section(section, locale),
            persisted: false,
            updated_at: Utc::now(),
        }
    }

    /// Content with `id` and `updatedAt` flattened in.
    pub fn to_json(&self) -> Value {
        let mut out = self.content.clone();
        out.insert("id".into(), Value::String(self.key.id.clone()));
        out.insert("updatedAt".into(), Value::String(format_timestamp(self.updated_at)));
        Value::Object(out)
    }

    /// Deserialize into a typed view. Content that no longer fits the view
    /// falls back to the section defaults.
    pub fn typed<T: SectionContent>(&self, locale: Locale) -> T {
        match serde_json::from_value(Value::Object(self.content.clone())) {
            Ok(view) => view,
            Err(err) => {
                tracing::warn!(document = %self.key, error = %err, "stored content does not match its section shape");
                serde_json::from_value(Value::Object(defaults::for_section(T::SECTION, locale)))
                    .unwrap_or_default()
            }
        }
    }
}

/// Reads and writes section documents.
#[derive(Clone)]
pub struct ContentService {
    store: Option<SharedStore>,
    events: EventBus,
}

impl ContentService {
    pub fn new(store: Option<SharedStore>, events: EventBus) -> Self {
        Self { store, events }
    }

    fn store(&self) -> ServiceResult<&SharedStore> {
        self.store.as_ref().ok_or_else(ServiceError::store_not_configured)
    }

    pub async fn load(&self, section: Section, locale: Locale) -> ContentSnapshot {
        let Some(store) = &self.store else {
            tracing::debug!(%section, %locale, "store not configured; serving default content");
            return ContentSnapshot::from_defaults(section, locale);
        };
        match store.get(&section.key(locale)).await {
            Ok(Some(doc)) => ContentSnapshot::from_document(doc),
            Ok(None) => ContentSnapshot::from_defaults(section, locale),
            Err(err) => {
                tracing::error!(%section, %locale, error = %err, "failed to read section content; serving defaults");
                ContentSnapshot::from_defaults(section, locale)
            }
        }
    }

    pub async fn load_typed<T: SectionContent>(&self, locale: Locale) -> T {
        self.load(T::SECTION, locale).await.typed(locale)
    }

    /// Merge `partial` into the section document and return the stored
    /// result. The first write to a section starts from its defaults so the
    /// persisted document is complete.
    pub async fn update(&self, section: Section, locale: Locale, partial: Value) -> ServiceResult<ContentSnapshot> {
        let store = self.store()?;
        let Value::Object(mut partial) = partial else {
            return Err(ValidationError::NotAnObject.into());
        };
        for key in MANAGED_KEYS {
            partial.remove(*key);
        }
        check_item_ids(&partial)?;

        let key = section.key(locale);
        let partial = match store.get(&key).await? {
            Some(_) => partial,
            None => {
                let mut seeded = defaults::for_section(section, locale);
                seeded.extend(partial);
                seeded
            }
        };

        let written = store.merge(&key, partial).await?;
        self.events.document_written(&written, ChangeKind::Updated);
        tracing::info!(document = %key, "section content updated");

        // Re-read so callers see exactly what is stored.
        let current = store.get(&key).await?.unwrap_or(written);
        Ok(ContentSnapshot::from_document(current))
    }

    /// Write one field identified by `path`, rewriting the whole top-level
    /// field it belongs to.
    pub async fn save_field(
        &self,
        section: Section,
        locale: Locale,
        path: &FieldPath,
        value: Value,
    ) -> ServiceResult<ContentSnapshot> {
        self.store()?;
        let current = self.load(section, locale).await;
        let (field, replacement) = path.apply(&current.content, value)?;
        let mut partial = Map::new();
        partial.insert(field, replacement);
        self.update(section, locale, Value::Object(partial)).await
    }

    /// Append an item to a list field, assigning a fresh id when the item has
    /// none.
    pub async fn append_item(
        &self,
        section: Section,
        locale: Locale,
        list: &str,
        mut item: Map<String, Value>,
    ) -> ServiceResult<ContentSnapshot> {
        self.store()?;
        let has_id = item
            .get("id")
            .and_then(Value::as_str)
            .is_some_and(|id| !id.trim().is_empty());
        if !has_id {
            item.insert("id".into(), Value::String(new_item_id(list)));
        }
        let current = self.load(section, locale).await;
        let mut items = list_items(&current.content, list)?;
        items.push(Value::Object(item));

        let mut partial = Map::new();
        partial.insert(list.to_string(), Value::Array(items));
        self.update(section, locale, Value::Object(partial)).await
    }

    pub async fn remove_item(
        &self,
        section: Section,
        locale: Locale,
        list: &str,
        item_id: &str,
    ) -> ServiceResult<ContentSnapshot> {
        self.store()?;
        let current = self.load(section, locale).await;
        let mut items = list_items(&current.content, list)?;
        let before = items.len();
        items.retain(|item| item.get("id").and_then(Value::as_str) != Some(item_id));
        if items.len() == before {
            return Err(ServiceError::NotFound(format!("{list} item {item_id}")));
        }

        let mut partial = Map::new();
        partial.insert(list.to_string(), Value::Array(items));
        self.update(section, locale, Value::Object(partial)).await
    }

    pub async fn page_sections(&self) -> Vec<PageSection> {
        self.load_typed::<PageSectionsContent>(Locale::DEFAULT).await.sections
    }

    /// Enabled home page blocks, in display order.
    pub async fn visible_sections(&self) -> Vec<PageSection> {
        sections::visible(&self.page_sections().await)
    }

    pub async fn toggle_section(&self, id: &str) -> ServiceResult<Vec<PageSection>> {
        self.store()?;
        let updated = sections::toggle(self.page_sections().await, id)?;
        self.write_page_sections(updated).await
    }

    pub async fn reorder_sections(&self, ids: &[String]) -> ServiceResult<Vec<PageSection>> {
        self.store()?;
        let updated = sections::reorder(self.page_sections().await, ids)?;
        self.write_page_sections(updated).await
    }

    async fn write_page_sections(&self, sections: Vec<PageSection>) -> ServiceResult<Vec<PageSection>> {
        let content = serde_json::to_value(PageSectionsContent { sections }).map_err(crate::store::StoreError::from)?;
        let snapshot = self.update(Section::PageSections, Locale::DEFAULT, content).await?;
        Ok(snapshot.typed::<PageSectionsContent>(Locale::DEFAULT).sections)
    }
}

/// A fresh list item id. Ids are never reused, even after deletion.
pub fn new_item_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::now_v7().simple())
}

fn list_items(content: &Map<String, Value>, list: &str) -> Result<Vec<Value>, ValidationError> {
    match content.get(list) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(_) => Err(ValidationError::invalid(list, "not a list")),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::store::testing::UnavailableStore;
    use crate::store::{DocumentStore, MemoryDocumentStore};

    fn service() -> (ContentService, MemoryDocumentStore) {
        let store = MemoryDocumentStore::new();
        let shared: SharedStore = Arc::new(store.clone());
        (ContentService::new(Some(shared), EventBus::new(16)), store)
    }

    #[test]
    fn section_keys() {
        assert_eq!(Section::About.key(Locale::He).id, "about_he");
        assert_eq!(Section::Privacy.key(Locale::He).id, "privacy");
        assert_eq!("page-sections".parse::<Section>().unwrap(), Section::PageSections);
        assert!("footer".parse::<Section>().is_err());
    }

    #[tokio::test]
    async fn every_section_loads_without_a_store() {
        let service = ContentService::new(None, EventBus::default());
        for section in Section::ALL {
            for locale in Locale::ALL {
                let snapshot = service.load(section, locale).await;
                assert!(!snapshot.persisted);
                assert!(!snapshot.content.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn read_failures_fall_back_to_defaults() {
        let service = ContentService::new(Some(Arc::new(UnavailableStore)), EventBus::default());
        let about: AboutContent = service.load_typed(Locale::En).await;
        assert_eq!(about.section_title, "About Us");
    }

    #[tokio::test]
    async fn update_without_store_is_not_configured() {
        let service = ContentService::new(None, EventBus::default());
        let err = service
            .update(Section::Hero, Locale::En, json!({"title": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn update_then_reload_reflects_the_write() {
        let (service, _) = service();
        let first = service
            .update(Section::About, Locale::En, json!({"sectionTitle": "Who we are"}))
            .await
            .unwrap();
        let second = service
            .update(Section::About, Locale::En, json!({"sectionSubtitle": "Since 2010"}))
            .await
            .unwrap();

        let loaded = service.load(Section::About, Locale::En).await;
        assert!(loaded.persisted);
        assert_eq!(loaded.content["sectionTitle"], "Who we are");
        assert_eq!(loaded.content["sectionSubtitle"], "Since 2010");
        // first write is seeded from defaults
        assert_eq!(loaded.content["features"].as_array().unwrap().len(), 3);
        assert!(second.updated_at > first.updated_at);

        // other locale untouched
        let he = service.load(Section::About, Locale::He).await;
        assert!(!he.persisted);
    }

    #[tokio::test]
    async fn managed_keys_are_ignored() {
        let (service, store) = service();
        service
            .update(Section::Privacy, Locale::En, json!({"id": "other", "updatedAt": "x", "introduction": "Hi"}))
            .await
            .unwrap();
        let doc = store.get(&Section::Privacy.key(Locale::En)).await.unwrap().unwrap();
        assert!(doc.content.get("id").is_none());
        assert!(doc.content.get("updatedAt").is_none());
        assert_eq!(doc.content["introduction"], "Hi");
    }

    #[tokio::test]
    async fn duplicate_item_ids_are_rejected() {
        let (service, store) = service();
        let err = service
            .update(
                Section::Services,
                Locale::En,
                json!({"services": [{"id": "a"}, {"id": "a"}]}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::DuplicateItemId { .. })));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn save_field_edits_one_list_item() {
        let (service, _) = service();
        let path: FieldPath = "services.strategy.title".parse().unwrap();
        let snapshot = service
            .save_field(Section::Services, Locale::He, &path, json!("אסטרטגיה"))
            .await
            .unwrap();

        let services: ServicesContent = snapshot.typed(Locale::He);
        assert_eq!(services.services.len(), 3);
        assert_eq!(services.services[2].title, "אסטרטגיה");
        assert_eq!(services.services[0].title, "ייעוץ השקעות");
    }

    #[tokio::test]
    async fn append_and_remove_items() {
        let (service, _) = service();
        let mut client = Map::new();
        client.insert("name".into(), json!("Acme"));
        let snapshot = service
            .append_item(Section::Clients, Locale::En, "clients", client)
            .await
            .unwrap();
        let clients: ClientsContent = snapshot.typed(Locale::En);
        assert_eq!(clients.clients.len(), 1);
        let id = clients.clients[0].id.clone();
        assert!(id.starts_with("clients_"));

        let snapshot = service
            .remove_item(Section::Clients, Locale::En, "clients", &id)
            .await
            .unwrap();
        assert!(snapshot.typed::<ClientsContent>(Locale::En).clients.is_empty());

        let err = service
            .remove_item(Section::Clients, Locale::En, "clients", &id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn page_sections_toggle_and_reorder() {
        let (service, _) = service();
        service.toggle_section("clients").await.unwrap();
        let visible: Vec<String> = service.visible_sections().await.into_iter().map(|s| s.id).collect();
        assert_eq!(visible, vec!["hero", "about", "services", "testimonials", "contact"]);

        let reordered = service
            .reorder_sections(&["contact".to_string(), "hero".to_string()])
            .await
            .unwrap();
        assert_eq!(reordered[0].id, "contact");
        assert_eq!(reordered[0].order, 1);
        assert_eq!(reordered[1].id, "hero");
        assert!(reordered.iter().any(|s| s.id == "clients" && !s.enabled));
    }

    #[test]
    fn item_ids_are_unique() {
        assert_ne!(new_item_id("features"), new_item_id("features"));
    }
}
