//! Reelvault Core
//!
//! Domain types, URL classification, and the document store abstraction
//! for the Reelvault video bookmarking client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Video`, `VideoList`, `VideoSnapshot`, `UserProfile`
//! - **Classification**: one pure `classify` used identically at creation
//!   and playback, plus the pure thumbnail/embed resolvers
//! - **Store Boundary**: the `DocumentStore` trait and `VideoWatch`
//!   subscription handle
//! - **Error Handling**: unified `VaultError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use reelvault_core::classify::{classify, Classification};
//! use reelvault_core::embed::youtube_thumbnail_url;
//!
//! let c = classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
//! if let Classification::YouTube(id) = c {
//!     assert_eq!(
//!         youtube_thumbnail_url(&id),
//!         "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg"
//!     );
//! }
//! ```

#![forbid(unsafe_code)]

pub mod classify;
pub mod embed;
pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use classify::{classify, classify_for, Classification};
pub use embed::{display_thumbnail, playback_target, PlaybackTarget};
pub use error::{Result, VaultError};
pub use storage::{DocumentStore, VideoWatch};

// Export all types
pub use types::{
    // Identities
    ListId, UserId, VideoId,
    // User
    UserProfile,
    // Videos
    CreateVideo, NewVideo, Platform, Video,
    // Lists
    CreateList, VideoList, VideoSnapshot,
};
