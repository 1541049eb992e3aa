use advisory_site_core::content::binding::FieldPath;
use advisory_site_core::content::Section;
use advisory_site_core::Locale;
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::parse_locale;
use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/content/{section}", get(load))
        .route("/api/page-sections", get(page_sections))
        .route("/api/admin/content/{section}", put(update))
        .route("/api/admin/content/{section}/field", put(save_field))
        .route("/api/admin/content/{section}/items/{list}", post(append_item))
        .route("/api/admin/content/{section}/items/{list}/{item_id}", delete(remove_item))
        .route("/api/admin/page-sections/{id}/toggle", patch(toggle_section))
        .route("/api/admin/page-sections/order", put(reorder_sections))
}

#[derive(Debug, Default, Deserialize)]
struct LocaleQuery {
    locale: Option<String>,
}

impl LocaleQuery {
    fn locale(&self) -> ApiResult<Locale> {
        Ok(parse_locale(self.locale.as_deref())?.unwrap_or_default())
    }
}

fn section(name: &str) -> ApiResult<Section> {
    name.parse().map_err(|_| ApiError::NotFound(format!("Unknown content section `{name}`")))
}

async fn load(
    State(state): State<AppState>,
    Path(name): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<LocaleQuery>, ApiError>,
) -> ApiResult<Json<Value>> {
    let snapshot = state.content().load(section(&name)?, query.locale()?).await;
    Ok(Json(snapshot.to_json()))
}

/// Every home page block in display order, enabled or not.
async fn page_sections(State(state): State<AppState>) -> Json<Value> {
    let mut sections = state.content().page_sections().await;
    sections.sort_by_key(|s| s.order);
    Json(json!({ "sections": sections }))
}

async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(name): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<LocaleQuery>, ApiError>,
    WithRejection(Json(partial), _): WithRejection<Json<Value>, ApiError>,
) -> ApiResult<Json<Value>> {
    let snapshot = state.content().update(section(&name)?, query.locale()?, partial).await?;
    Ok(Json(snapshot.to_json()))
}

#[derive(Debug, Deserialize)]
struct FieldWrite {
    #[serde(default)]
    locale: Option<String>,
    path: String,
    value: Value,
}

/// The write behind one inline-edited field.
async fn save_field(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(name): Path<String>,
    WithRejection(Json(write), _): WithRejection<Json<FieldWrite>, ApiError>,
) -> ApiResult<Json<Value>> {
    let locale = parse_locale(write.locale.as_deref())?.unwrap_or_default();
    let path = write
        .path
        .parse::<FieldPath>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let snapshot = state.content().save_field(section(&name)?, locale, &path, write.value).await?;
    Ok(Json(snapshot.to_json()))
}

async fn append_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path((name, list)): Path<(String, String)>,
    WithRejection(Query(query), _): WithRejection<Query<LocaleQuery>, ApiError>,
    WithRejection(Json(item), _): WithRejection<Json<Map<String, Value>>, ApiError>,
) -> ApiResult<Json<Value>> {
    let snapshot = state
        .content()
        .append_item(section(&name)?, query.locale()?, &list, item)
        .await?;
    Ok(Json(snapshot.to_json()))
}

async fn remove_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path((name, list, item_id)): Path<(String, String, String)>,
    WithRejection(Query(query), _): WithRejection<Query<LocaleQuery>, ApiError>,
) -> ApiResult<Json<Value>> {
    let snapshot = state
        .content()
        .remove_item(section(&name)?, query.locale()?, &list, &item_id)
        .await?;
    Ok(Json(snapshot.to_json()))
}

async fn toggle_section(State(state): State<AppState>, _admin: AdminUser, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let sections = state.content().toggle_section(&id).await?;
    Ok(Json(json!({ "sections": sections })))
}

#[derive(Debug, Deserialize)]
struct Reorder {
    ids: Vec<String>,
}

async fn reorder_sections(
    State(state): State<AppState>,
    _admin: AdminUser,
    WithRejection(Json(body), _): WithRejection<Json<Reorder>, ApiError>,
) -> ApiResult<Json<Value>> {
    let sections = state.content().reorder_sections(&body.ids).await?;
    Ok(Json(json!({ "sections": sections })))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use chrono::DateTime;
    use serde_json::json;

    use crate::routes::testing::TestApp;

    #[tokio::test]
    async fn every_section_loads_without_a_store() {
        let app = TestApp::unconfigured();
        for section in ["hero", "about", "services", "clients", "testimonials", "landing", "privacy", "page-sections"] {
            for locale in ["en", "he"] {
                let (status, body) = app.get(&format!("/api/content/{section}?locale={locale}")).await;
                assert_eq!(status, StatusCode::OK, "{section} {locale}");
                assert!(body.as_object().unwrap().len() > 2, "{section} {locale}");
            }
        }
        let (status, _) = app.get("/api/content/pricing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_then_read_back() {
        let app = TestApp::memory();
        let (status, first) = app
            .admin(Method::PUT, "/api/admin/content/hero?locale=he", Some(json!({ "title": "כותרת" })))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, second) = app
            .admin(Method::PUT, "/api/admin/content/hero?locale=he", Some(json!({ "title": "כותרת חדשה" })))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, read) = app.get("/api/content/hero?locale=he").await;
        assert_eq!(read["title"], "כותרת חדשה");
        assert_eq!(read["id"], "hero_he");
        assert!(read["badge"].is_string());

        let stamp = |v: &serde_json::Value| DateTime::parse_from_rfc3339(v["updatedAt"].as_str().unwrap()).unwrap();
        assert!(stamp(&second) > stamp(&first));

        let (_, english) = app.get("/api/content/hero?locale=en").await;
        assert_ne!(english["title"], "כותרת חדשה");
    }

    #[tokio::test]
    async fn field_writes_and_list_items() {
        let app = TestApp::memory();
        let (status, body) = app
            .admin(
                Method::POST,
                "/api/admin/content/testimonials/items/testimonials?locale=en",
                Some(json!({ "name": "Ruth", "content": "Great advice", "rating": 5 })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let added = body["testimonials"].as_array().unwrap().last().unwrap().clone();
        let item_id = added["id"].as_str().unwrap().to_string();
        assert!(item_id.starts_with("testimonials_"));

        let (status, body) = app
            .admin(
                Method::PUT,
                "/api/admin/content/testimonials/field",
                Some(json!({ "locale": "en", "path": format!("testimonials.{item_id}.content"), "value": "Superb" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let edited = body["testimonials"]
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["id"] == item_id.as_str())
            .unwrap();
        assert_eq!(edited["content"], "Superb");

        let (status, _) = app
            .admin(
                Method::DELETE,
                &format!("/api/admin/content/testimonials/items/testimonials/{item_id}?locale=en"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = app
            .admin(
                Method::DELETE,
                &format!("/api/admin/content/testimonials/items/testimonials/{item_id}?locale=en"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_bad_writes() {
        let app = TestApp::memory();
        let (status, _) = app
            .admin(Method::PUT, "/api/admin/content/hero", Some(json!(["not", "an", "object"])))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = app
            .admin(Method::PUT, "/api/admin/content/hero/field", Some(json!({ "path": "a.b", "value": 1 })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = app.get("/api/admin/content/hero").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn page_sections_toggle_and_reorder() {
        let app = TestApp::memory();
        let (_, body) = app.get("/api/page-sections").await;
        let ids: Vec<&str> = body["sections"].as_array().unwrap().iter().map(|s| s["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["hero", "about", "services", "clients", "testimonials", "contact"]);

        let (status, body) = app.admin(Method::PATCH, "/api/admin/page-sections/clients/toggle", None).await;
        assert_eq!(status, StatusCode::OK);
        let clients = body["sections"].as_array().unwrap().iter().find(|s| s["id"] == "clients").unwrap();
        assert_eq!(clients["enabled"], false);

        let (status, body) = app
            .admin(Method::PUT, "/api/admin/page-sections/order", Some(json!({ "ids": ["contact", "hero"] })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"][0]["id"], "contact");
        assert_eq!(body["sections"][0]["order"], 1);

        let (status, _) = app.admin(Method::PATCH, "/api/admin/page-sections/pricing/toggle", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
