use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{check_credentials, issue_token, AdminUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/session", get(session))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> ApiResult<Json<Value>> {
    let email = check_credentials(state.config(), &body.email, &body.password).inspect_err(|e| {
        if matches!(e, ApiError::Unauthorized) {
            tracing::warn!(email = %body.email.trim(), "failed admin login");
        }
    })?;
    let token = issue_token(state.config(), &email, true)?;
    tracing::info!(%email, "admin signed in");
    Ok(Json(json!({ "token": token, "email": email })))
}

async fn session(admin: AdminUser) -> Json<Value> {
    Json(json!({ "email": admin.email, "admin": true }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use advisory_site_core::store::MemoryDocumentStore;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::auth::issue_token;
    use crate::auth::tests::{admin_config, token_config};
    use crate::config::AppConfig;
    use crate::routes::testing::{json_request, TestApp};

    #[tokio::test]
    async fn login_issues_a_usable_token() {
        let app = TestApp::with(None, None, admin_config());
        let (status, body) = app
            .json(json_request(
                Method::POST,
                "/api/admin/login",
                Some(json!({ "email": "owner@skyadvisers.com", "password": "correct horse" })),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = app
            .json(json_request(Method::GET, "/api/admin/session", None, Some(&token)))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "owner@skyadvisers.com");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let app = TestApp::with(None, None, admin_config());
        let (status, body) = app
            .json(json_request(
                Method::POST,
                "/api/admin/login",
                Some(json!({ "email": "owner@skyadvisers.com", "password": "nope" })),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let app = TestApp::with(None, None, admin_config());
        let (status, body) = app
            .json(json_request(Method::POST, "/api/admin/login", Some(json!({ "email": 1 })), None))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn non_admin_token_is_forbidden() {
        let app = TestApp::memory();
        let token = crate::auth::issue_token(app.state.config(), "visitor@gmail.com", false).unwrap();
        let (status, _) = app
            .json(json_request(Method::GET, "/api/admin/session", None, Some(&token)))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn without_a_secret_admin_routes_are_closed() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let app = TestApp::with(Some(Arc::new(MemoryDocumentStore::new())), None, config);
        let forged = issue_token(&token_config(), "attacker@skyadvisers.com", false).unwrap();
        let (status, body) = app
            .json(json_request(Method::GET, "/api/admin/contacts", None, Some(&forged)))
            .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Admin login not configured");
    }
}
