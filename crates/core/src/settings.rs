//! Site-wide contact details and social links, stored as the singleton
//! `site_settings/contact_info`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::validate::require_fields;
use crate::document::{collections, DocumentKey, StoredDocument};
use crate::error::{ServiceError, ServiceResult};
use crate::events::{ChangeKind, EventBus};
use crate::store::{DocumentStore, SharedStore};

pub const CONTACT_INFO_ID: &str = "contact_info";

pub const DEFAULT_EMAIL: &str = "info@skyadvisers.com";
pub const DEFAULT_PHONE: &str = "+1 (555) 123-4567";
pub const DEFAULT_ADDRESS: &str = "123 Business St, City, State 12345";
pub const DEFAULT_BUSINESS_NAME: &str = "Skyadvisers";

fn contact_info_key() -> DocumentKey {
    DocumentKey::new(collections::SITE_SETTINGS, CONTACT_INFO_ID)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub facebook: String,
    pub twitter: String,
    pub linkedin: String,
    pub youtube: String,
}

impl SocialLinks {
    /// Non-empty links as `(network, url)` pairs, in display order.
    pub fn present(&self) -> Vec<(&'static str, &str)> {
        [
            ("facebook", self.facebook.as_str()),
            ("twitter", self.twitter.as_str()),
            ("linkedin", self.linkedin.as_str()),
            ("youtube", self.youtube.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub business_name: String,
}

impl ContactInfo {
    pub fn defaults() -> Self {
        Self {
            email: DEFAULT_EMAIL.into(),
            phone: DEFAULT_PHONE.into(),
            address: DEFAULT_ADDRESS.into(),
            business_name: DEFAULT_BUSINESS_NAME.into(),
        }
    }
}

/// The admin view and write shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    pub contact_info: ContactInfo,
    pub social_links: SocialLinks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SiteSettings {
    pub fn defaults() -> Self {
        Self {
            contact_info: ContactInfo::defaults(),
            social_links: SocialLinks::default(),
            updated_at: None,
        }
    }

    fn from_document(doc: &StoredDocument) -> Self {
        let text = |field: &str| {
            doc.content
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            contact_info: ContactInfo {
                email: text("email"),
                phone: text("phone"),
                address: text("address"),
                business_name: text("businessName"),
            },
            social_links: SocialLinks {
                facebook: text("facebook"),
                twitter: text("twitter"),
                linkedin: text("linkedin"),
                youtube: text("youtube"),
            },
            updated_at: Some(doc.updated_at),
        }
    }

    fn into_content(self) -> Map<String, Value> {
        let SiteSettings {
            contact_info,
            social_links,
            ..
        } = self;
        [
            ("email", contact_info.email.trim().to_string()),
            ("phone", contact_info.phone.trim().to_string()),
            ("address", contact_info.address.trim().to_string()),
            ("businessName", contact_info.business_name.trim().to_string()),
            ("facebook", social_links.facebook.trim().to_string()),
            ("twitter", social_links.twitter.trim().to_string()),
            ("linkedin", social_links.linkedin.trim().to_string()),
            ("youtube", social_links.youtube.trim().to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v)))
        .collect()
    }

    /// The public shape: blank stored fields fall back to the defaults.
    pub fn public(&self) -> PublicContactInfo {
        let or = |value: &str, default: &str| {
            if value.trim().is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        };
        let info = &self.contact_info;
        PublicContactInfo {
            email: or(&info.email, DEFAULT_EMAIL),
            phone: or(&info.phone, DEFAULT_PHONE),
            address: or(&info.address, DEFAULT_ADDRESS),
            business_name: or(&info.business_name, DEFAULT_BUSINESS_NAME),
            social_links: self.social_links.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub business_name: String,
    pub social_links: SocialLinks,
}

#[derive(Clone)]
pub struct SettingsService {
    store: Option<SharedStore>,
    events: EventBus,
}

impl SettingsService {
    pub fn new(store: Option<SharedStore>, events: EventBus) -> Self {
        Self { store, events }
    }

    fn store(&self) -> ServiceResult<&SharedStore> {
        self.store.as_ref().ok_or_else(ServiceError::store_not_configured)
    }

    /// Contact details for the public site. Never fails: anything short of
    /// a stored document yields the defaults.
    pub async fn public_contact_info(&self) -> PublicContactInfo {
        let Some(store) = &self.store else {
            return SiteSettings::defaults().public();
        };
        match store.get(&contact_info_key()).await {
            Ok(Some(doc)) => SiteSettings::from_document(&doc).public(),
            Ok(None) => SiteSettings::defaults().public(),
            Err(err) => {
                tracing::error!(error = %err, "failed to read contact info; serving defaults");
                SiteSettings::defaults().public()
            }
        }
    }

    /// Stored settings as entered, or the defaults when nothing is stored.
    pub async fn admin_settings(&self) -> ServiceResult<SiteSettings> {
        let doc = self.store()?.get(&contact_info_key()).await?;
        Ok(doc.as_ref().map_or_else(SiteSettings::defaults, SiteSettings::from_document))
    }

    /// Replace the stored settings wholesale.
    pub async fn update(&self, settings: SiteSettings) -> ServiceResult<SiteSettings> {
        let store = self.store()?;
        let info = &settings.contact_info;
        require_fields(&[
            ("email", info.email.as_str()),
            ("phone", info.phone.as_str()),
            ("address", info.address.as_str()),
        ])?;

        let doc = store.replace(&contact_info_key(), settings.into_content()).await?;
        self.events.document_written(&doc, ChangeKind::Updated);
        tracing::info!("contact info updated");
        Ok(SiteSettings::from_document(&doc))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::document::ValidationError;
    use crate::store::testing::UnavailableStore;
    use crate::store::MemoryDocumentStore;

    fn service() -> SettingsService {
        SettingsService::new(Some(Arc::new(MemoryDocumentStore::new())), EventBus::new(16))
    }

    fn settings(email: &str, phone: &str, address: &str) -> SiteSettings {
        SiteSettings {
            contact_info: ContactInfo {
                email: email.into(),
                phone: phone.into(),
                address: address.into(),
                business_name: String::new(),
            },
            social_links: SocialLinks {
                linkedin: "https://linkedin.com/company/skyadvisers".into(),
                ..SocialLinks::default()
            },
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn public_info_defaults_everywhere() {
        let expected = SiteSettings::defaults().public();
        assert_eq!(expected.business_name, "Skyadvisers");
        assert_eq!(SettingsService::new(None, EventBus::default()).public_contact_info().await, expected);
        assert_eq!(service().public_contact_info().await, expected);
        assert_eq!(
            SettingsService::new(Some(Arc::new(UnavailableStore)), EventBus::default())
                .public_contact_info()
                .await,
            expected
        );
    }

    #[tokio::test]
    async fn update_replaces_and_public_fills_blanks() {
        let settings_service = service();
        let saved = settings_service
            .update(settings("hello@skyadvisers.com", "+972-3-000-0000", "Tel Aviv"))
            .await
            .unwrap();
        assert!(saved.updated_at.is_some());

        let admin = settings_service.admin_settings().await.unwrap();
        assert_eq!(admin.contact_info.email, "hello@skyadvisers.com");
        assert_eq!(admin.contact_info.business_name, "");

        let public = settings_service.public_contact_info().await;
        assert_eq!(public.email, "hello@skyadvisers.com");
        assert_eq!(public.business_name, DEFAULT_BUSINESS_NAME);
        assert_eq!(public.social_links.present(), vec![("linkedin", "https://linkedin.com/company/skyadvisers")]);
    }

    #[tokio::test]
    async fn update_requires_core_fields() {
        let err = service().update(settings("", "1", " ")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::MissingFields(ref fields)) if fields == &vec!["email", "address"]
        ));
    }

    #[tokio::test]
    async fn admin_requires_store() {
        let unconfigured = SettingsService::new(None, EventBus::default());
        assert!(matches!(
            unconfigured.admin_settings().await,
            Err(ServiceError::NotConfigured(_))
        ));
        let defaults = service().admin_settings().await.unwrap();
        assert_eq!(defaults, SiteSettings::defaults());
    }
}
