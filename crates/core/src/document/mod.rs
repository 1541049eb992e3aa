pub mod id;
pub mod model;
pub mod validate;

pub use id::{collections, DocumentKey};
pub use model::StoredDocument;
pub use validate::ValidationError;
