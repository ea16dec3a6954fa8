//! In-memory document store.
//!
//! Backs the test suite and local development. Mirrors the remote store's
//! contract exactly: store-assigned ids, insertion-order filtered reads,
//! full-document list updates, and a push-updated videos subscription.

use async_trait::async_trait;
use reelvault_core::error::{Result, VaultError};
use reelvault_core::storage::{DocumentStore, VideoWatch};
use reelvault_core::types::{
    CreateList, CreateVideo, ListId, UserId, Video, VideoId, VideoList, VideoSnapshot,
};
use std::sync::Arc;
use tokio::sync::{broadcast, watch, RwLock};
use tracing::debug;
use uuid::Uuid;

struct Inner {
    // Vecs keep insertion order, which is the contract for filtered reads.
    videos: RwLock<Vec<Video>>,
    lists: RwLock<Vec<VideoList>>,
    changed: broadcast::Sender<()>,
}

/// In-memory `DocumentStore` implementation.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (changed, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(Inner {
                videos: RwLock::new(Vec::new()),
                lists: RwLock::new(Vec::new()),
                changed,
            }),
        }
    }

    fn notify(&self) {
        // No receivers is fine; watches come and go.
        let _ = self.inner.changed.send(());
    }

    async fn owner_videos(inner: &Inner, owner: &UserId) -> Vec<Video> {
        inner
            .videos
            .read()
            .await
            .iter()
            .filter(|v| &v.owner_id == owner)
            .cloned()
            .collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_video(&self, video: CreateVideo) -> Result<Video> {
        let video = video.into_video(VideoId::new(Uuid::new_v4().to_string()));
        self.inner.videos.write().await.push(video.clone());
        debug!(video_id = %video.id, "created video");
        self.notify();
        Ok(video)
    }

    async fn get_video(&self, id: &VideoId) -> Result<Option<Video>> {
        Ok(self
            .inner
            .videos
            .read()
            .await
            .iter()
            .find(|v| &v.id == id)
            .cloned())
    }

    async fn delete_video(&self, id: &VideoId) -> Result<()> {
        self.inner.videos.write().await.retain(|v| &v.id != id);
        debug!(video_id = %id, "deleted video");
        self.notify();
        Ok(())
    }

    async fn videos_for_owner(&self, owner: &UserId) -> Result<Vec<Video>> {
        Ok(Self::owner_videos(&self.inner, owner).await)
    }

    async fn watch_videos(&self, owner: &UserId) -> Result<VideoWatch> {
        let initial = Self::owner_videos(&self.inner, owner).await;
        let (tx, rx) = watch::channel(initial);
        let mut changes = self.inner.changed.subscribe();
        let inner = Arc::clone(&self.inner);
        let owner = owner.clone();

        let feeder = tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        let snapshot = Self::owner_videos(&inner, &owner).await;
                        if tx.send(snapshot).is_err() {
                            // Consumer dropped the handle; discard and stop.
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Ok(VideoWatch::new(rx, Some(feeder)))
    }

    async fn create_list(&self, list: CreateList) -> Result<VideoList> {
        let list = list.into_list(ListId::new(Uuid::new_v4().to_string()));
        self.inner.lists.write().await.push(list.clone());
        debug!(list_id = %list.id, "created list");
        Ok(list)
    }

    async fn get_list(&self, id: &ListId) -> Result<Option<VideoList>> {
        Ok(self
            .inner
            .lists
            .read()
            .await
            .iter()
            .find(|l| &l.id == id)
            .cloned())
    }

    async fn update_list_videos(&self, id: &ListId, videos: Vec<VideoSnapshot>) -> Result<()> {
        let mut lists = self.inner.lists.write().await;
        match lists.iter_mut().find(|l| &l.id == id) {
            Some(list) => {
                list.videos = videos;
                Ok(())
            }
            None => Err(VaultError::ListNotFound(id.clone())),
        }
    }

    async fn delete_list(&self, id: &ListId) -> Result<()> {
        self.inner.lists.write().await.retain(|l| &l.id != id);
        debug!(list_id = %id, "deleted list");
        Ok(())
    }

    async fn lists_for_owner(&self, owner: &UserId) -> Result<Vec<VideoList>> {
        Ok(self
            .inner
            .lists
            .read()
            .await
            .iter()
            .filter(|l| &l.owner_id == owner)
            .cloned()
            .collect())
    }
}
