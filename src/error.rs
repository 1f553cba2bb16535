//! Error types for Artifactory operations

use reqwest::StatusCode;
use thiserror::Error;

/// Artifactory client errors
#[derive(Debug, Error)]
pub enum Error {
    // ============ Configuration Errors ============
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid client configuration: {message}")]
    InvalidConfig { message: String },

    // ============ Network Errors ============
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed: {status} for {url}")]
    Api {
        status: StatusCode,
        url: String,
        message: String,
    },

    #[error("File statistics are not available for files in virtual repositories ({repository_key}/{path})")]
    StatisticsUnsupported {
        repository_key: String,
        path: String,
        #[source]
        source: Box<Error>,
    },

    // ============ Resource Errors ============
    #[error("File has no attribute {name}")]
    UnknownAttribute { name: String },

    #[error("Attribute {name} missing from server response for {path}")]
    MissingAttribute { name: String, path: String },

    #[error("Repository not found: {key}")]
    RepositoryNotFound { key: String },

    #[error("Repository key {key} matched {count} repositories, expected exactly one")]
    AmbiguousRepository { key: String, count: usize },

    // ============ Query Errors ============
    #[error("Query cursor has no find() clause")]
    EmptyQuery,

    // ============ Decoding Errors ============
    #[error("Invalid timestamp {value}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for Artifactory operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// HTTP status carried by an API error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::StatisticsUnsupported { source, .. } => source.status(),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub(crate) fn unexpected(message: impl Into<String>) -> Self {
        Error::UnexpectedResponse {
            message: message.into(),
        }
    }
}
