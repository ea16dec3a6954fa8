//! Reelvault Backend Client
//!
//! HTTP client for the managed backend Reelvault delegates everything to:
//! the identity service, the `videos`/`lists` document collections, and
//! the public thumbnail lookup endpoint.
//!
//! # Features
//!
//! - **Authentication**: email/password sign-in, sign-up, sign-out, and a
//!   session-change stream
//! - **Documents**: typed CRUD plus ownership-filtered reads and a
//!   polling-based live subscription, implementing
//!   `reelvault_core::DocumentStore`
//! - **Thumbnails**: best-effort Instagram oEmbed lookup, degrading to a
//!   placeholder on any failure
//!
//! # Example
//!
//! ```ignore
//! use reelvault_client::{BackendClient, BackendConfig};
//! use reelvault_library::VideoLibrary;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BackendClient::new(BackendConfig::new("https://api.reelvault.app"))?;
//!     let profile = client.sign_in("ada@example.com", "hunter2").await?;
//!
//!     let library = VideoLibrary::new(client.documents().await?);
//!     for video in library.videos_for(&profile.id).await? {
//!         println!("{}", video.title);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod auth;
mod client;
mod documents;
mod error;
mod thumbnail;
mod types;

// Re-export main types
pub use client::BackendClient;
pub use documents::DocumentsClient;
pub use error::{BackendError, Result};
pub use thumbnail::ThumbnailClient;
pub use types::{
    BackendConfig, OembedResponse, SessionResponse, SignInRequest, SignUpRequest,
    DEFAULT_OEMBED_URL, DEFAULT_POLL_SECS,
};

// Re-export sub-client for direct use if needed
pub use auth::AuthClient;
