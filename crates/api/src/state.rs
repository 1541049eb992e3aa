use std::sync::Arc;

use advisory_site_core::blog::BlogService;
use advisory_site_core::contact::ContactService;
use advisory_site_core::content::ContentService;
use advisory_site_core::events::EventBus;
use advisory_site_core::image::ImageStorage;
use advisory_site_core::settings::SettingsService;
use advisory_site_core::store::SharedStore;

use crate::config::AppConfig;
use crate::error::ApiError;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: Option<SharedStore>,
    images: Option<Arc<dyn ImageStorage>>,
    config: AppConfig,
    event_bus: EventBus,
    content: ContentService,
    blog: BlogService,
    contacts: ContactService,
    settings: SettingsService,
}

impl AppState {
    pub fn new(
        store: Option<SharedStore>,
        images: Option<Arc<dyn ImageStorage>>,
        config: AppConfig,
        event_bus: EventBus,
    ) -> Self {
        let content = ContentService::new(store.clone(), event_bus.clone());
        let blog = BlogService::new(store.clone(), event_bus.clone(), config.default_author.clone());
        let contacts = ContactService::new(store.clone(), event_bus.clone());
        let settings = SettingsService::new(store.clone(), event_bus.clone());
        Self {
            inner: Arc::new(InnerState {
                store,
                images,
                config,
                event_bus,
                content,
                blog,
                contacts,
                settings,
            }),
        }
    }

    pub fn store(&self) -> Option<&SharedStore> {
        self.inner.store.as_ref()
    }

    pub fn images(&self) -> Result<&dyn ImageStorage, ApiError> {
        self.inner
            .images
            .as_deref()
            .ok_or_else(|| ApiError::Unavailable("Image storage not configured".to_string()))
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }

    pub fn content(&self) -> &ContentService {
        &self.inner.content
    }

    pub fn blog(&self) -> &BlogService {
        &self.inner.blog
    }

    pub fn contacts(&self) -> &ContactService {
        &self.inner.contacts
    }

    pub fn settings(&self) -> &SettingsService {
        &self.inner.settings
    }
}
