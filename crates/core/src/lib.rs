//! Domain core for the advisory site: bilingual page content, blog posts,
//! contact submissions, site settings and the document store they share.

pub mod blog;
pub mod contact;
pub mod content;
pub mod document;
pub mod editor;
pub mod error;
pub mod events;
pub mod i18n;
pub mod image;
pub mod locale;
pub mod settings;
pub mod store;

pub use error::{ServiceError, ServiceResult};
pub use locale::Locale;
