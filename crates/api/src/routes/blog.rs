use advisory_site_core::blog::PostInput;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::{json, Value};

use super::parse_locale;
use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/blog", get(list_published).post(create_post))
        .route("/api/blog/{slug}", get(get_published))
        .route("/api/admin/blog", get(list_all).post(create_post))
        .route(
            "/api/admin/blog/{id}",
            get(get_post).put(update_post).patch(set_status).delete(delete_post),
        )
}

#[derive(Debug, Default, Deserialize)]
struct PublicQuery {
    locale: Option<String>,
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusChange {
    status: String,
}

async fn list_published(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<PublicQuery>, ApiError>,
) -> ApiResult<Json<Value>> {
    let locale = parse_locale(query.locale.as_deref())?;
    let posts = state.blog().list_published(locale, query.q.as_deref()).await?;
    Ok(Json(json!({ "posts": posts })))
}

async fn get_published(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<PublicQuery>, ApiError>,
) -> ApiResult<Json<Value>> {
    let locale = parse_locale(query.locale.as_deref())?;
    let post = state.blog().find_published(&slug, locale).await?;
    Ok(Json(json!({ "post": post })))
}

async fn list_all(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<Value>> {
    let posts = state.blog().list_all().await?;
    Ok(Json(json!({ "posts": posts })))
}

async fn get_post(State(state): State<AppState>, _admin: AdminUser, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let post = state.blog().get(&id).await?;
    Ok(Json(json!({ "post": post })))
}

async fn create_post(
    State(state): State<AppState>,
    admin: AdminUser,
    WithRejection(Json(input), _): WithRejection<Json<PostInput>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let post = state.blog().create(input, Some(&admin.email)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Blog post created successfully", "id": post.id, "post": post })),
    ))
}

async fn update_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    WithRejection(Json(input), _): WithRejection<Json<PostInput>, ApiError>,
) -> ApiResult<Json<Value>> {
    let post = state.blog().update(&id, input).await?;
    Ok(Json(json!({ "message": "Blog post updated successfully", "post": post })))
}

async fn set_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    WithRejection(Json(change), _): WithRejection<Json<StatusChange>, ApiError>,
) -> ApiResult<Json<Value>> {
    let post = state.blog().set_status(&id, &change.status).await?;
    Ok(Json(json!({ "message": "Blog post status updated successfully", "post": post })))
}

async fn delete_post(State(state): State<AppState>, _admin: AdminUser, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    state.blog().delete(&id).await?;
    Ok(Json(json!({ "message": "Blog post deleted successfully" })))
}
