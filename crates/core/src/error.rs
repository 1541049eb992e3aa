use thiserror::Error;

use crate::document::ValidationError;
use crate::store::StoreError;

/// Error returned by the domain services. The HTTP layer maps each variant
/// to a status code.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No document store (or image storage) was configured at startup.
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn store_not_configured() -> Self {
        ServiceError::NotConfigured("store")
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
