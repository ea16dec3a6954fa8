//! The list/video association service.
//!
//! Every operation takes the explicit identity of the signed-in user;
//! nothing here reads ambient session state.

use chrono::Utc;
use reelvault_core::classify::classify_for;
use reelvault_core::error::{Result, VaultError};
use reelvault_core::storage::{DocumentStore, VideoWatch};
use reelvault_core::types::{
    CreateList, CreateVideo, ListId, NewVideo, UserId, Video, VideoId, VideoList, VideoSnapshot,
};
use tracing::{debug, info, warn};

/// Association service over a document store.
///
/// The `videos` collection and each list's embedded snapshot array are
/// independent sources of truth: deleting a video leaves its snapshots
/// behind, and deleting a list leaves its videos behind. Multi-step
/// mutations are two independent round trips with no rollback.
pub struct VideoLibrary<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> VideoLibrary<S> {
    /// Wrap a document store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create an empty named list and return its id for immediate use.
    pub async fn create_list(&self, owner: &UserId, title: &str) -> Result<ListId> {
        if title.trim().is_empty() {
            return Err(VaultError::validation("list name is required"));
        }

        let list = self
            .store
            .create_list(CreateList {
                owner_id: owner.clone(),
                title: title.to_string(),
            })
            .await?;

        info!(list_id = %list.id, title = %list.title, "list created");
        Ok(list.id)
    }

    /// Persist a new video and, if a list was selected, append a snapshot
    /// of it to that list.
    ///
    /// The append is a read-then-write of the whole embedded sequence and
    /// is not atomic against concurrent writers: two near-simultaneous
    /// additions to the same list race, and the last writer wins.
    ///
    /// If the target list vanished between selection and write, the call
    /// fails with `ListNotFound` but the already-created video persists
    /// standalone; there is no compensating rollback.
    pub async fn add_video(
        &self,
        owner: &UserId,
        form: NewVideo,
        resolved_preview: String,
        list: Option<&ListId>,
    ) -> Result<VideoId> {
        form.validate()?;
        classify_for(&form.source_url, form.platform)?;
        if resolved_preview.trim().is_empty() {
            return Err(VaultError::validation(
                "a preview image must be resolved before submission",
            ));
        }

        let video = self
            .store
            .create_video(CreateVideo {
                owner_id: owner.clone(),
                title: form.title,
                description: form.description,
                source_url: form.source_url,
                platform: form.platform,
                preview_image_url: resolved_preview,
                created_at: Utc::now(),
            })
            .await?;
        info!(video_id = %video.id, platform = %video.platform, "video created");

        if let Some(list_id) = list {
            self.append_to_list(list_id, &video).await?;
        }

        Ok(video.id)
    }

    /// Read-then-write append of a snapshot to a list's embedded sequence.
    async fn append_to_list(&self, list_id: &ListId, video: &Video) -> Result<()> {
        let Some(current) = self.store.get_list(list_id).await? else {
            warn!(list_id = %list_id, video_id = %video.id,
                "selected list no longer exists; video kept standalone");
            return Err(VaultError::ListNotFound(list_id.clone()));
        };

        let mut videos = current.videos;
        videos.push(VideoSnapshot::of(video));
        self.store.update_list_videos(list_id, videos).await?;
        debug!(list_id = %list_id, video_id = %video.id, "snapshot appended");
        Ok(())
    }

    /// Delete a video row.
    ///
    /// Known limitation, asserted by the test suite: snapshots of this
    /// video embedded in any list are left in place.
    pub async fn delete_video(&self, id: &VideoId) -> Result<()> {
        self.store.delete_video(id).await
    }

    /// Delete a list document. The video rows it snapshotted are untouched.
    pub async fn delete_list(&self, id: &ListId) -> Result<()> {
        self.store.delete_list(id).await
    }

    /// Videos owned by a user, insertion-ordered as the store returns them.
    pub async fn videos_for(&self, owner: &UserId) -> Result<Vec<Video>> {
        self.store.videos_for_owner(owner).await
    }

    /// Lists owned by a user, insertion-ordered as the store returns them.
    pub async fn lists_for(&self, owner: &UserId) -> Result<Vec<VideoList>> {
        self.store.lists_for_owner(owner).await
    }

    /// Long-lived subscription to a user's videos.
    pub async fn watch_videos(&self, owner: &UserId) -> Result<VideoWatch> {
        self.store.watch_videos(owner).await
    }
}
