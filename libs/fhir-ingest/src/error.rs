//! Error types for resource ingestion

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Ingestion errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("No name for profile {url}")]
    MalformedProfile { url: String },

    #[error("Invalid denylist pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Specification model error: {0}")]
    Model(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
