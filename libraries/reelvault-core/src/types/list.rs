/// List domain types
use crate::types::{ListId, Platform, UserId, Video, VideoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Denormalized copy of a video's fields embedded in a list document at
/// the time of association.
///
/// Snapshots are never synchronized with the canonical `Video` row:
/// deleting or changing the source video leaves the snapshot behind
/// (a deliberate read-optimization, asserted as known behavior by the
/// test suite).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSnapshot {
    /// Id the store assigned to the source video
    pub id: VideoId,
    /// Owner at the time of association
    pub owner_id: UserId,
    /// Title at the time of association
    pub title: String,
    /// Description at the time of association
    pub description: String,
    /// Source URL at the time of association
    pub source_url: String,
    /// Platform at the time of association
    pub platform: Platform,
    /// Preview image at the time of association
    pub preview_image_url: String,
    /// Creation timestamp of the source video
    pub created_at: DateTime<Utc>,
}

impl VideoSnapshot {
    /// Snapshot a video's full field set, including its assigned id.
    pub fn of(video: &Video) -> Self {
        Self {
            id: video.id.clone(),
            owner_id: video.owner_id.clone(),
            title: video.title.clone(),
            description: video.description.clone(),
            source_url: video.source_url.clone(),
            platform: video.platform,
            preview_image_url: video.preview_image_url.clone(),
            created_at: video.created_at,
        }
    }
}

/// A named, ordered collection of video snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoList {
    /// Unique list identifier, assigned by the store on creation
    pub id: ListId,

    /// Owning user (client-side filter field)
    pub owner_id: UserId,

    /// List title
    pub title: String,

    /// Embedded snapshots, in association order
    pub videos: Vec<VideoSnapshot>,
}

impl VideoList {
    /// Thumbnail shown on the list-of-lists screen: the first snapshot's
    /// preview, if the list has one.
    pub fn cover_image(&self) -> Option<&str> {
        self.videos.first().map(|v| v.preview_image_url.as_str())
    }
}

/// New list payload; the store assigns the id and the sequence starts empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateList {
    /// Owning user
    pub owner_id: UserId,
    /// List title
    pub title: String,
}

impl CreateList {
    /// Materialize the stored list once the store has assigned an id.
    pub fn into_list(self, id: ListId) -> VideoList {
        VideoList {
            id,
            owner_id: self.owner_id,
            title: self.title,
            videos: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> Video {
        Video {
            id: VideoId::new("v-1"),
            owner_id: UserId::new("u-1"),
            title: "Clip".into(),
            description: "A clip".into(),
            source_url: "https://youtu.be/dQw4w9WgXcQ".into(),
            platform: Platform::YouTube,
            preview_image_url: "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn snapshot_copies_every_field() {
        let v = video();
        let snap = VideoSnapshot::of(&v);
        assert_eq!(snap.id, v.id);
        assert_eq!(snap.title, v.title);
        assert_eq!(snap.description, v.description);
        assert_eq!(snap.source_url, v.source_url);
        assert_eq!(snap.platform, v.platform);
        assert_eq!(snap.preview_image_url, v.preview_image_url);
        assert_eq!(snap.created_at, v.created_at);
    }

    #[test]
    fn cover_image_is_first_snapshot() {
        let v = video();
        let mut list = VideoList {
            id: ListId::new("l-1"),
            owner_id: UserId::new("u-1"),
            title: "Favorites".into(),
            videos: vec![],
        };
        assert!(list.cover_image().is_none());

        list.videos.push(VideoSnapshot::of(&v));
        assert_eq!(list.cover_image(), Some(v.preview_image_url.as_str()));
    }
}
