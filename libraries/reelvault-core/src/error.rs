/// Core error types for Reelvault
use crate::types::{ListId, VideoId};
use thiserror::Error;

/// Result type alias using `VaultError`
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for Reelvault
#[derive(Error, Debug)]
pub enum VaultError {
    /// Required field missing or blank; reported before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Submitted URL matches no known platform pattern
    #[error("Unrecognized video URL: {0}")]
    UnrecognizedUrl(String),

    /// User-selected platform disagrees with what the URL classifies as
    #[error("URL is a {classified} link but {selected} was selected")]
    PlatformMismatch {
        /// Platform the user picked in the form
        selected: String,
        /// Platform the classifier extracted from the URL
        classified: String,
    },

    /// Video not found
    #[error("Video not found: {0}")]
    VideoNotFound(VideoId),

    /// Target list vanished between selection and write
    #[error("List not found: {0}")]
    ListNotFound(ListId),

    /// Stored document did not parse as the expected record shape
    #[error("Malformed {collection} record {id}: {reason}")]
    MalformedRecord {
        /// Collection the record came from
        collection: &'static str,
        /// Document id
        id: String,
        /// Parse failure detail
        reason: String,
    },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl VaultError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a malformed-record error
    pub fn malformed(
        collection: &'static str,
        id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            collection,
            id: id.into(),
            reason: reason.into(),
        }
    }
}
