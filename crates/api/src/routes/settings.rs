use advisory_site_core::settings::{PublicContactInfo, SiteSettings};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/contact-info", get(public_contact_info))
        .route("/api/admin/contact-info", get(admin_settings).put(update_settings))
}

/// Never fails: missing or unreadable settings fall back to the defaults.
async fn public_contact_info(State(state): State<AppState>) -> Json<PublicContactInfo> {
    Json(state.settings().public_contact_info().await)
}

async fn admin_settings(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<SiteSettings>> {
    Ok(Json(state.settings().admin_settings().await?))
}

async fn update_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
    WithRejection(Json(settings), _): WithRejection<Json<SiteSettings>, ApiError>,
) -> ApiResult<Json<Value>> {
    let settings = state.settings().update(settings).await?;
    Ok(Json(json!({ "message": "Contact information updated successfully", "settings": settings })))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::routes::testing::TestApp;

    #[tokio::test]
    async fn public_defaults_without_store() {
        let (status, body) = TestApp::unconfigured().get("/api/contact-info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["businessName"], "Skyadvisers");
        assert_eq!(body["phone"], "+1 (555) 123-4567");
    }

    #[tokio::test]
    async fn admin_update_round_trip() {
        let app = TestApp::memory();
        let (status, body) = app
            .admin(
                Method::PUT,
                "/api/admin/contact-info",
                Some(json!({
                    "contactInfo": {
                        "email": "office@skyadvisers.com",
                        "phone": "+972-3-555-0000",
                        "address": "Rothschild Blvd 1, Tel Aviv",
                    },
                    "socialLinks": { "linkedin": "https://linkedin.com/company/skyadvisers" },
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert!(body["settings"]["updatedAt"].is_string());

        let (_, public) = app.get("/api/contact-info").await;
        assert_eq!(public["email"], "office@skyadvisers.com");
        assert_eq!(public["businessName"], "Skyadvisers");
        assert_eq!(public["socialLinks"]["linkedin"], "https://linkedin.com/company/skyadvisers");
    }

    #[tokio::test]
    async fn admin_update_requires_fields() {
        let app = TestApp::memory();
        let (status, body) = app
            .admin(Method::PUT, "/api/admin/contact-info", Some(json!({ "contactInfo": { "email": "a@b.co" } })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields: phone, address");
    }

    #[tokio::test]
    async fn admin_read_needs_store() {
        let (status, _) = TestApp::unconfigured()
            .admin(Method::GET, "/api/admin/contact-info", None)
            .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
