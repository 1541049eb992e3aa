pub mod auth;
pub mod blog;
pub mod contacts;
pub mod content;
pub mod events;
pub mod health;
pub mod images;
pub mod settings;

use advisory_site_core::Locale;
use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;

use crate::error::{ApiError, ApiResult};
use crate::middleware::locale::redirect_missing_locale;
use crate::pages;
use crate::state::AppState;

/// Largest request body accepted anywhere; image uploads are the biggest.
const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(blog::routes())
        .merge(contacts::routes())
        .merge(settings::routes())
        .merge(content::routes())
        .merge(images::routes())
        .merge(events::routes())
        .merge(pages::routes());

    let base_url = state.config().upload_base_url.trim_end_matches('/');
    if let Some(dir) = &state.config().upload_dir {
        if base_url.starts_with('/') {
            router = router.nest_service(base_url, ServeDir::new(dir));
        } else {
            tracing::info!(base_url, "uploads served externally; not mounting upload directory");
        }
    }

    router
        .layer(middleware::from_fn(redirect_missing_locale))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

/// Parse an optional `?locale=` value. Unknown codes are a client error.
pub(crate) fn parse_locale(code: Option<&str>) -> ApiResult<Option<Locale>> {
    match code.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(None),
        Some(code) => code
            .parse::<Locale>()
            .map(Some)
            .map_err(|e| ApiError::BadRequest(e.to_string())),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use advisory_site_core::document::{DocumentKey, StoredDocument};
    use advisory_site_core::events::EventBus;
    use advisory_site_core::image::{ImageStorage, LocalImageStorage};
    use advisory_site_core::store::{DocumentStore, MemoryDocumentStore, SharedStore, StoreError, StoreResult};
    use advisory_site_query::Query;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{Map, Value};
    use tower::ServiceExt;

    use super::build_router;
    use crate::auth::issue_token;
    use crate::auth::tests::token_config;
    use crate::config::AppConfig;
    use crate::state::AppState;

    /// A configured store whose backend cannot be reached.
    pub(crate) struct OfflineStore;

    fn offline<T>() -> StoreResult<T> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    #[async_trait]
    impl DocumentStore for OfflineStore {
        async fn get(&self, _: &DocumentKey) -> StoreResult<Option<StoredDocument>> {
            offline()
        }
        async fn insert(&self, _: &str, _: Map<String, Value>) -> StoreResult<StoredDocument> {
            offline()
        }
        async fn merge(&self, _: &DocumentKey, _: Map<String, Value>) -> StoreResult<StoredDocument> {
            offline()
        }
        async fn update(&self, _: &DocumentKey, _: Map<String, Value>) -> StoreResult<Option<StoredDocument>> {
            offline()
        }
        async fn replace(&self, _: &DocumentKey, _: Map<String, Value>) -> StoreResult<StoredDocument> {
            offline()
        }
        async fn delete(&self, _: &DocumentKey) -> StoreResult<bool> {
            offline()
        }
        async fn query(&self, _: &Query) -> StoreResult<Vec<StoredDocument>> {
            offline()
        }
    }

    pub(crate) struct TestApp {
        pub state: AppState,
        pub router: Router,
    }

    impl TestApp {
        pub fn with(store: Option<SharedStore>, images: Option<Arc<dyn ImageStorage>>, config: AppConfig) -> Self {
            let state = AppState::new(store, images, config, EventBus::new(64));
            let router = build_router(state.clone());
            Self { state, router }
        }

        /// In-memory store, no image storage.
        pub fn memory() -> Self {
            Self::with(Some(Arc::new(MemoryDocumentStore::new())), None, token_config())
        }

        pub fn unconfigured() -> Self {
            Self::with(None, None, token_config())
        }

        pub fn with_images(dir: &std::path::Path) -> Self {
            let config = AppConfig {
                upload_dir: Some(dir.to_path_buf()),
                ..token_config()
            };
            let images: Arc<dyn ImageStorage> = Arc::new(LocalImageStorage::new(dir, "/uploads"));
            Self::with(Some(Arc::new(MemoryDocumentStore::new())), Some(images), config)
        }

        pub fn admin_token(&self) -> String {
            issue_token(self.state.config(), "owner@skyadvisers.com", true).unwrap()
        }

        pub async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let headers = response.headers().clone();
            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, headers, body.to_vec())
        }

        pub async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
            let (status, _, body) = self.send(request).await;
            let value = if body.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&body).unwrap()
            };
            (status, value)
        }

        pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
            self.json(Request::get(uri).body(Body::empty()).unwrap()).await
        }

        pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            self.json(json_request(method, uri, body, Some(&self.admin_token()))).await
        }
    }

    pub(crate) fn json_request(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }
}
