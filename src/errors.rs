//! Error types for the retrieval core
//!
//! Provides the retrieval error taxonomy with context propagation.
//! Only `IdentityRequired` and `MetadataUnavailable` ever reach callers
//! of `Retriever::retrieve`; the remaining variants are recovered or
//! logged internally.

use thiserror::Error;

/// Main error type for the retrieval core
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Requester identity missing or blank; fatal, no retry
    #[error("Requester identity required: {0}")]
    IdentityRequired(String),

    /// Similarity-search backend unreachable after the degraded retry
    #[error("Search backend unavailable: {0}")]
    SearchBackendUnavailable(String),

    /// Batched document metadata lookup failed; fatal because passages
    /// cannot be served without a visibility check
    #[error("Document metadata unavailable: {0}")]
    MetadataUnavailable(String),

    /// Cache tier failure; treated as a miss, never surfaced to callers
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Analytics persistence failure; logged only, never surfaced
    #[error("Analytics recording failed: {0}")]
    AnalyticsFailure(String),

    /// Invalid retrieval parameters
    #[error("Invalid retrieval parameters: {0}")]
    InvalidParams(String),

    /// HTTP errors from the shared cache tier
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for retrieval operations
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Convert anyhow errors from backend adapters into the core taxonomy
impl From<anyhow::Error> for RetrievalError {
    fn from(err: anyhow::Error) -> Self {
        RetrievalError::SearchBackendUnavailable(err.to_string())
    }
}
