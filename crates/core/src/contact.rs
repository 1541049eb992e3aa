//! Contact form submissions and their admin follow-up workflow.
//!
//! A submission starts as `new`, becomes `read` the first time an admin
//! opens it, and is marked `responded` by hand. Submissions are never
//! deleted.

use std::fmt;
use std::str::FromStr;

use advisory_site_query::{Direction, Filter, OrderKey, Query};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::validate::{require_fields, validate_email};
use crate::document::{collections, DocumentKey, StoredDocument, ValidationError};
use crate::error::{ServiceError, ServiceResult};
use crate::events::{ChangeKind, EventBus};
use crate::locale::Locale;
use crate::store::{DocumentStore, SharedStore};

pub const SOURCE: &str = "website_contact_form";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Responded,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 3] = [ContactStatus::New, ContactStatus::Read, ContactStatus::Responded];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
            ContactStatus::Responded => "responded",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

/// The public contact form body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Browser-side submission time, kept verbatim.
    #[serde(alias = "clientTimestamp")]
    pub timestamp: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub locale: Locale,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_timestamp: Option<String>,
    pub status: ContactStatus,
    pub source: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ContactRecord {
    name: String,
    email: String,
    message: String,
    locale: Locale,
    client_timestamp: Option<String>,
    status: ContactStatus,
    source: String,
}

impl ContactSubmission {
    pub fn from_document(doc: &StoredDocument) -> Result<Self, serde_json::Error> {
        let record: ContactRecord = serde_json::from_value(Value::Object(doc.content.clone()))?;
        Ok(Self {
            id: doc.id().to_string(),
            name: record.name,
            email: record.email,
            message: record.message,
            locale: record.locale,
            submitted_at: doc.created_at,
            client_timestamp: record.client_timestamp,
            status: record.status,
            source: record.source,
        })
    }

    /// A `mailto:` link pre-filled with a reply quoting the message. Opening
    /// it is not tracked; marking the submission responded is a separate
    /// step.
    pub fn reply_link(&self) -> String {
        let subject = "Re: Your inquiry to Skyadvisers";
        let body = format!(
            "Dear {},\n\nThank you for contacting Skyadvisers. We have received your message:\n\n\"{}\"\n\nWe will get back to you shortly with a detailed response.\n\nBest regards,\nSkyadvisers Team",
            self.name, self.message
        );
        format!(
            "mailto:{}?subject={}&body={}",
            self.email,
            encode_uri_component(subject),
            encode_uri_component(&body)
        )
    }
}

/// Percent-encode everything outside the URI-component unreserved set.
fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// What happened to a valid submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Stored { id: String },
    /// No store, or the write failed; the submission was only logged.
    Logged,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenedContact {
    pub contact: ContactSubmission,
    /// True when this open moved the submission from `new` to `read`.
    pub transitioned: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub new: usize,
    pub read: usize,
    pub responded: usize,
}

impl StatusCounts {
    pub fn tally(contacts: &[ContactSubmission]) -> Self {
        contacts.iter().fold(Self::default(), |mut counts, c| {
            match c.status {
                ContactStatus::New => counts.new += 1,
                ContactStatus::Read => counts.read += 1,
                ContactStatus::Responded => counts.responded += 1,
            }
            counts
        })
    }
}

#[derive(Clone)]
pub struct ContactService {
    store: Option<SharedStore>,
    events: EventBus,
}

impl ContactService {
    pub fn new(store: Option<SharedStore>, events: EventBus) -> Self {
        Self { store, events }
    }

    fn store(&self) -> ServiceResult<&SharedStore> {
        self.store.as_ref().ok_or_else(ServiceError::store_not_configured)
    }

    /// Validate and record a submission. Validation failures are errors; a
    /// missing or failing store is not, and the submission is logged instead.
    pub async fn submit(&self, form: ContactForm) -> ServiceResult<SubmitOutcome> {
        require_fields(&[
            ("name", form.name.as_str()),
            ("email", form.email.as_str()),
            ("message", form.message.as_str()),
        ])?;
        validate_email(&form.email)?;

        let locale = form
            .locale
            .as_deref()
            .and_then(Locale::from_code)
            .unwrap_or_default();

        let Some(store) = &self.store else {
            tracing::warn!(
                name = %form.name,
                email = %form.email,
                message = %form.message,
                %locale,
                "contact submission not persisted: store not configured"
            );
            return Ok(SubmitOutcome::Logged);
        };

        let mut content = Map::new();
        content.insert("name".into(), Value::String(form.name.trim().to_string()));
        content.insert("email".into(), Value::String(form.email.trim().to_lowercase()));
        content.insert("message".into(), Value::String(form.message.trim().to_string()));
        content.insert("locale".into(), Value::String(locale.code().into()));
        content.insert(
            "clientTimestamp".into(),
            form.timestamp.clone().map(Value::String).unwrap_or(Value::Null),
        );
        content.insert("status".into(), Value::String(ContactStatus::New.as_str().into()));
        content.insert("source".into(), Value::String(SOURCE.into()));

        match store.insert(collections::CONTACTS, content).await {
            Ok(doc) => {
                self.events.document_written(&doc, ChangeKind::Created);
                tracing::info!(contact_id = %doc.id(), "contact submission stored");
                Ok(SubmitOutcome::Stored {
                    id: doc.id().to_string(),
                })
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    name = %form.name,
                    email = %form.email,
                    message = %form.message,
                    %locale,
                    "contact submission not persisted: store write failed"
                );
                Ok(SubmitOutcome::Logged)
            }
        }
    }

    /// Submissions newest first, optionally filtered by status and by a
    /// case-insensitive search over name, email and message.
    pub async fn list(&self, status: Option<ContactStatus>, search: Option<&str>) -> ServiceResult<Vec<ContactSubmission>> {
        let mut query = Query::collection(collections::CONTACTS).order_by(OrderKey::CreatedAt, Direction::Desc);
        if let Some(status) = status {
            query = query.filter(Filter::eq("status", status.as_str()));
        }
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(Filter::contains(["name", "email", "message"], term));
        }
        let docs = self.store()?.query(&query).await?;
        Ok(docs
            .iter()
            .filter_map(|doc| match ContactSubmission::from_document(doc) {
                Ok(contact) => Some(contact),
                Err(err) => {
                    tracing::warn!(document = %doc.key, error = %err, "skipping malformed contact");
                    None
                }
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> ServiceResult<ContactSubmission> {
        let doc = self
            .store()?
            .get(&DocumentKey::new(collections::CONTACTS, id))
            .await?
            .ok_or_else(|| ServiceError::NotFound("Contact".into()))?;
        ContactSubmission::from_document(&doc).map_err(|e| ServiceError::Store(e.into()))
    }

    /// Open a submission for reading. A `new` submission becomes `read`;
    /// any other status is left untouched and nothing is written.
    pub async fn open(&self, id: &str) -> ServiceResult<OpenedContact> {
        let contact = self.get(id).await?;
        if contact.status != ContactStatus::New {
            return Ok(OpenedContact {
                contact,
                transitioned: false,
            });
        }
        let contact = self.write_status(id, ContactStatus::Read).await?;
        Ok(OpenedContact {
            contact,
            transitioned: true,
        })
    }

    pub async fn set_status(&self, id: &str, status: &str) -> ServiceResult<ContactSubmission> {
        let status: ContactStatus = status.parse()?;
        self.write_status(id, status).await
    }

    async fn write_status(&self, id: &str, status: ContactStatus) -> ServiceResult<ContactSubmission> {
        let mut partial = Map::new();
        partial.insert("status".into(), Value::String(status.as_str().into()));
        let doc = self
            .store()?
            .update(&DocumentKey::new(collections::CONTACTS, id), partial)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Contact".into()))?;
        self.events.document_written(&doc, ChangeKind::Updated);
        tracing::info!(contact_id = %id, %status, "contact status changed");
        ContactSubmission::from_document(&doc).map_err(|e| ServiceError::Store(e.into()))
    }
}
