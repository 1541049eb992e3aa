/// Document addressing.
///
/// Every document lives in a collection under a string id:
/// - Blog posts / contacts: generated UUIDv7 ids
/// - Site content: `{section}_{locale}` or a shared section key
/// - Settings: fixed singleton ids such as `contact_info`
use std::fmt;

use uuid::Uuid;

use crate::locale::Locale;

pub mod collections {
    pub const BLOG_POSTS: &str = "blog_posts";
    pub const CONTACTS: &str = "contacts";
    pub const SITE_SETTINGS: &str = "site_settings";
    pub const SITE_CONTENT: &str = "site_content";
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentKey {
    pub collection: String,
    pub id: String,
}

impl DocumentKey {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// A fresh key with a time-ordered id.
    pub fn generate(collection: impl Into<String>) -> Self {
        Self::new(collection, Uuid::now_v7().to_string())
    }

    /// `site_content/{section}_{locale}`.
    pub fn localized_content(section: &str, locale: Locale) -> Self {
        Self::new(collections::SITE_CONTENT, format!("{section}_{}", locale.code()))
    }

    /// `site_content/{key}` for sections without per-locale variants.
    pub fn shared_content(key: &str) -> Self {
        Self::new(collections::SITE_CONTENT, key)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_content_key() {
        let key = DocumentKey::localized_content("about", Locale::He);
        assert_eq!(key.collection, "site_content");
        assert_eq!(key.id, "about_he");
        assert_eq!(key.to_string(), "site_content/about_he");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = DocumentKey::generate(collections::BLOG_POSTS);
        let b = DocumentKey::generate(collections::BLOG_POSTS);
        assert_ne!(a.id, b.id);
    }
}
