use asp_core::{AspError, InputTypeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Plan(#[from] AspError),

    #[error("Elevation lookup failed: {0}")]
    Elevation(String),
}

impl From<InputTypeError> for IoError {
    fn from(err: InputTypeError) -> Self {
        IoError::Plan(err.into())
    }
}

pub type Result<T> = std::result::Result<T, IoError>;
