use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to read PDF {path}: {message}")]
    Pdf { path: String, message: String },

    #[error("{service} request failed with HTTP {status}: {body}")]
    Remote { service: &'static str, status: u16, body: String },

    #[error("Embedding dimension mismatch: got {got}, expected {expected}")]
    DimensionMismatch { got: usize, expected: usize },

    #[error("Operation failed: {0}")]
    Operation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
