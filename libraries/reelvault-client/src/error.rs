//! Error types for the backend client.

use reelvault_core::VaultError;
use thiserror::Error;

/// Errors that can occur when talking to the managed backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("Backend error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available
    #[error("Authentication required")]
    AuthRequired,

    /// Authentication failed (invalid credentials or expired token)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid backend URL
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Backend is offline or unreachable
    #[error("Backend unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for backend client operations.
pub type Result<T> = std::result::Result<T, BackendError>;

// The `DocumentStore` implementation reports through the core error type;
// wire-level failures fold into its storage/network categories.
impl From<BackendError> for VaultError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Request(e) => VaultError::network(e.to_string()),
            BackendError::ServerUnreachable(msg) => VaultError::network(msg),
            BackendError::ServerError { status, message } => {
                VaultError::storage(format!("backend returned {status}: {message}"))
            }
            BackendError::AuthRequired => VaultError::storage("authentication required"),
            BackendError::AuthFailed(msg) => {
                VaultError::storage(format!("authentication failed: {msg}"))
            }
            BackendError::InvalidUrl(msg) => VaultError::storage(format!("invalid URL: {msg}")),
            BackendError::ParseError(msg) => VaultError::storage(format!("bad response: {msg}")),
        }
    }
}
