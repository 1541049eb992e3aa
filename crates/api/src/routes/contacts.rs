use advisory_site_core::contact::{ContactForm, ContactStatus, StatusCounts, SubmitOutcome};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(submit))
        .route("/api/admin/contacts", get(list))
        .route("/api/admin/contacts/{id}", get(get_contact).patch(set_status))
        .route("/api/admin/contacts/{id}/open", post(open))
}

async fn submit(
    State(state): State<AppState>,
    WithRejection(Json(form), _): WithRejection<Json<ContactForm>, ApiError>,
) -> ApiResult<Json<Value>> {
    let message = "Contact form submitted successfully";
    let body = match state.contacts().submit(form).await? {
        SubmitOutcome::Stored { id } => json!({ "message": message, "id": id }),
        SubmitOutcome::Logged => json!({ "message": message }),
    };
    Ok(Json(body))
}

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    status: Option<String>,
    q: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
    WithRejection(Query(query), _): WithRejection<Query<ListQuery>, ApiError>,
) -> ApiResult<Json<Value>> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(s) => Some(s.parse::<ContactStatus>().map_err(|e| ApiError::BadRequest(e.to_string()))?),
    };
    let search = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let all = state.contacts().list(None, None).await?;
    let counts = StatusCounts::tally(&all);
    let contacts = if status.is_none() && search.is_none() {
        all
    } else {
        state.contacts().list(status, search).await?
    };
    Ok(Json(json!({ "contacts": contacts, "counts": counts })))
}

async fn get_contact(State(state): State<AppState>, _admin: AdminUser, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let contact = state.contacts().get(&id).await?;
    let reply_link = contact.reply_link();
    Ok(Json(json!({ "contact": contact, "replyLink": reply_link })))
}

#[derive(Debug, Deserialize)]
struct StatusChange {
    status: String,
}

async fn set_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    WithRejection(Json(change), _): WithRejection<Json<StatusChange>, ApiError>,
) -> ApiResult<Json<Value>> {
    let contact = state.contacts().set_status(&id, &change.status).await?;
    Ok(Json(json!({ "message": "Contact status updated successfully", "contact": contact })))
}

/// Open a submission in the admin view. The first open marks it read.
async fn open(State(state): State<AppState>, _admin: AdminUser, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let opened = state.contacts().open(&id).await?;
    let reply_link = opened.contact.reply_link();
    Ok(Json(json!({
        "contact": opened.contact,
        "transitioned": opened.transitioned,
        "replyLink": reply_link,
    })))
}
