//! Error types for the artifact cache

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Cache and acquisition errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("force-download and cache-only are mutually exclusive")]
    ConflictingFlags,

    #[error("Resource missing from cache: {0}")]
    MissingCacheArtifact(String),

    #[error("Failed to download {url}: status {status}")]
    Download { url: String, status: u16 },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Offline mode: {0} must be placed in the cache manually")]
    Offline(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed version.info: {0}")]
    MalformedVersionInfo(String),
}
