//! REST store error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestStoreError {
    #[error("Image {image_id} not found")]
    NotFound { image_id: i64 },

    #[error("API error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

impl From<RestStoreError> for store_traits::StoreError {
    fn from(err: RestStoreError) -> Self {
        match err {
            RestStoreError::NotFound { image_id } => {
                store_traits::StoreError::NotFound { image_id }
            }
            RestStoreError::Api {
                status_code,
                message,
            } => store_traits::StoreError::Api {
                status_code,
                message,
            },
            RestStoreError::Network(msg) => store_traits::StoreError::Network(msg),
            RestStoreError::Parse(msg) => store_traits::StoreError::Parse(msg),
            RestStoreError::InvalidUpload(msg) => store_traits::StoreError::Api {
                status_code: 400,
                message: msg,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, RestStoreError>;
