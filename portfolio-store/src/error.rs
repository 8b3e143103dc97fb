//! Error types for the store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unknown record type, record id or file.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend could not be reached or answered with a failure status.
    #[error("transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record or schema did not match the model.
    #[error("model error: {0}")]
    Model(#[from] portfolio_model::ModelError),

    /// IO error (fixture files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid data returned by the backend.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Invalid backend configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// True for failures worth retrying by hand (connectivity, server errors).
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Transport(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::InvalidData(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}
