use advisory_site_core::document::{collections, DocumentKey};
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/ping", get(ping))
}

/// Health check. Running without a store is a valid, degraded mode; a
/// configured store that cannot answer is not.
async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let database = match state.store() {
        None => "not configured",
        Some(store) => {
            store
                .get(&DocumentKey::new(collections::SITE_SETTINGS, "health_check"))
                .await
                .map_err(|e| ApiError::Unavailable(format!("database health check failed: {e}")))?;
            "connected"
        }
    };

    Ok(Json(json!({
        "status": "ok",
        "database": database,
        "subscribers": state.event_bus().subscriber_count(),
    })))
}

/// Lightweight ping, no database check.
async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;

    use crate::config::AppConfig;
    use crate::routes::testing::{OfflineStore, TestApp};

    #[tokio::test]
    async fn reports_store_state() {
        let (status, body) = TestApp::memory().get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "connected");

        let (status, body) = TestApp::unconfigured().get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "not configured");

        let app = TestApp::with(Some(Arc::new(OfflineStore)), None, AppConfig::default());
        let (status, body) = app.get("/health").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("health check failed"));
    }

    #[tokio::test]
    async fn ping_needs_nothing() {
        let (status, body) = TestApp::unconfigured().get("/v1/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
