use thiserror::Error;

/// Error taxonomy shared by the store, the index and the service.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Member not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RosterError>;
