use thiserror::Error;

use super::product::ProductId;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Product with id #{id} not found")]
    ProductNotFound { id: ProductId },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn product_not_found(id: ProductId) -> Self {
        Self::ProductNotFound { id }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
