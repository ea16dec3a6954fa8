//! Document store abstraction.
//!
//! Two top-level collections, `videos` and `lists`, addressed by opaque
//! string id and filtered by equality on the ownership field. This trait
//! abstracts the remote managed backend so the association service can
//! run against an in-memory implementation in tests.

use crate::error::Result;
use crate::types::{CreateList, CreateVideo, ListId, UserId, Video, VideoId, VideoList, VideoSnapshot};
use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Store operations for the `videos` and `lists` collections.
///
/// No schema enforcement is assumed beyond what the record types state;
/// implementations must reject malformed documents at this boundary with
/// `VaultError::MalformedRecord` instead of propagating loose fields.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // ========================================================================
    // Videos
    // ========================================================================

    /// Create a video; the store assigns the id.
    async fn create_video(&self, video: CreateVideo) -> Result<Video>;

    /// Point read of a video by id.
    async fn get_video(&self, id: &VideoId) -> Result<Option<Video>>;

    /// Delete a video row. Does not touch any list's embedded snapshots.
    async fn delete_video(&self, id: &VideoId) -> Result<()>;

    /// Videos owned by a user, in the order the store returns them.
    async fn videos_for_owner(&self, owner: &UserId) -> Result<Vec<Video>>;

    /// Long-lived push subscription to a user's videos.
    async fn watch_videos(&self, owner: &UserId) -> Result<VideoWatch>;

    // ========================================================================
    // Lists
    // ========================================================================

    /// Create a list with an empty snapshot sequence; the store assigns the id.
    async fn create_list(&self, list: CreateList) -> Result<VideoList>;

    /// Point read of a list by id.
    async fn get_list(&self, id: &ListId) -> Result<Option<VideoList>>;

    /// Full-document replacement of a list's embedded snapshot sequence.
    ///
    /// Not an atomic append: callers read the current sequence, append,
    /// and write the whole thing back. Fails with `ListNotFound` if the
    /// list vanished in between.
    async fn update_list_videos(&self, id: &ListId, videos: Vec<VideoSnapshot>) -> Result<()>;

    /// Whole-document delete, no cascading cleanup of video rows.
    async fn delete_list(&self, id: &ListId) -> Result<()>;

    /// Lists owned by a user, in the order the store returns them.
    async fn lists_for_owner(&self, owner: &UserId) -> Result<Vec<VideoList>>;
}

/// Handle to a live videos-for-owner subscription.
///
/// Holds the latest snapshot in a `watch` channel and tears the
/// subscription down exactly once when dropped. A publication arriving
/// after the handle is gone is simply discarded.
#[derive(Debug)]
pub struct VideoWatch {
    receiver: watch::Receiver<Vec<Video>>,
    feeder: Option<JoinHandle<()>>,
}

impl VideoWatch {
    /// Wrap a receiver and the background task feeding it.
    pub fn new(receiver: watch::Receiver<Vec<Video>>, feeder: Option<JoinHandle<()>>) -> Self {
        Self { receiver, feeder }
    }

    /// Current snapshot of the subscribed videos.
    pub fn current(&self) -> Vec<Video> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next published snapshot.
    ///
    /// Returns `None` once the publishing side has gone away.
    pub async fn changed(&mut self) -> Option<Vec<Video>> {
        match self.receiver.changed().await {
            Ok(()) => Some(self.receiver.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}

impl Drop for VideoWatch {
    fn drop(&mut self) {
        if let Some(task) = self.feeder.take() {
            task.abort();
        }
    }
}
