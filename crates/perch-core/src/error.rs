use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerchError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
