use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Image {image_id} not found in remote store")]
    NotFound { image_id: i64 },

    #[error("Store API error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse store response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
