//! Reelvault Library
//!
//! The list/video association service: named lists holding denormalized
//! snapshots of bookmarked videos, implemented over the `DocumentStore`
//! trait from `reelvault-core`, plus an in-memory store for tests and
//! local development.
//!
//! # Example
//!
//! ```rust
//! use reelvault_core::types::{NewVideo, Platform, UserId};
//! use reelvault_library::{MemoryStore, VideoLibrary};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> reelvault_core::Result<()> {
//! let library = VideoLibrary::new(MemoryStore::new());
//! let owner = UserId::new("user-1");
//!
//! let list_id = library.create_list(&owner, "Favorites").await?;
//! let video_id = library
//!     .add_video(
//!         &owner,
//!         NewVideo {
//!             title: "Baking bread".into(),
//!             description: "Sourdough basics".into(),
//!             source_url: "https://youtu.be/dQw4w9WgXcQ".into(),
//!             platform: Platform::YouTube,
//!         },
//!         "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg".into(),
//!         Some(&list_id),
//!     )
//!     .await?;
//!
//! let lists = library.lists_for(&owner).await?;
//! assert_eq!(lists[0].videos[0].id, video_id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod library;
mod memory;

pub use library::VideoLibrary;
pub use memory::MemoryStore;
