use advisory_site_core::image::UploadedImage;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/admin/images", post(upload).delete(remove))
}

#[derive(Debug, Deserialize)]
struct UploadQuery {
    folder: String,
    filename: String,
}

/// Store the raw request body as an image. The document that will point at
/// it is written separately by the caller.
async fn upload(
    State(state): State<AppState>,
    _admin: AdminUser,
    WithRejection(Query(query), _): WithRejection<Query<UploadQuery>, ApiError>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<UploadedImage>)> {
    let storage = state.images()?;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let image = storage.upload(&query.folder, &query.filename, content_type, &body).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    path: String,
}

async fn remove(
    State(state): State<AppState>,
    _admin: AdminUser,
    WithRejection(Query(query), _): WithRejection<Query<DeleteQuery>, ApiError>,
) -> ApiResult<Json<Value>> {
    state.images()?.delete(&query.path).await?;
    Ok(Json(json!({ "message": "Image deleted successfully" })))
}
