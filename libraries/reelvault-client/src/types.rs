//! Types for backend API requests and responses.

use reelvault_core::types::UserProfile;
use serde::{Deserialize, Serialize};

/// Default public oEmbed endpoint for Instagram thumbnail lookups.
pub const DEFAULT_OEMBED_URL: &str = "https://api.instagram.com/oembed";

/// How often the polling watch re-fetches videos-for-owner, in seconds.
pub const DEFAULT_POLL_SECS: u64 = 5;

/// Configuration for connecting to the managed backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g. "https://api.reelvault.app")
    pub base_url: String,
    /// Current access token (if signed in)
    pub access_token: Option<String>,
    /// oEmbed endpoint used for Instagram thumbnail lookups
    pub oembed_url: String,
}

impl BackendConfig {
    /// Create a config with just the backend URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
            oembed_url: DEFAULT_OEMBED_URL.to_string(),
        }
    }

    /// Create a config with an existing token (e.g. from stored credentials).
    pub fn with_token(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: Some(access_token.into()),
            oembed_url: DEFAULT_OEMBED_URL.to_string(),
        }
    }

    /// Override the oEmbed endpoint (tests point this at a mock server).
    pub fn with_oembed_url(mut self, oembed_url: impl Into<String>) -> Self {
        self.oembed_url = oembed_url.into();
        self
    }
}

/// Request body for sign-in.
#[derive(Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Request body for sign-up.
#[derive(Debug, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Response from successful sign-in or sign-up.
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub user: UserProfile,
}

/// oEmbed-style thumbnail lookup response. Only the one field matters;
/// everything else the endpoint returns is ignored.
#[derive(Debug, Deserialize)]
pub struct OembedResponse {
    pub thumbnail_url: Option<String>,
}
