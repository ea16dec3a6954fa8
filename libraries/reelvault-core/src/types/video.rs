/// Video domain types
use crate::error::{Result, VaultError};
use crate::types::{UserId, VideoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// External platform a bookmarked video lives on.
///
/// Wire values match the stored documents (`"YouTube"` / `"Instagram"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// youtube.com / youtu.be
    YouTube,
    /// instagram.com posts and reels
    Instagram,
}

impl Platform {
    /// Stable string form used in stored documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::Instagram => "Instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookmarked video.
///
/// Immutable once created; there is no edit flow. Deleted independently
/// by id, without touching any list that snapshotted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Unique video identifier, assigned by the store on creation
    pub id: VideoId,

    /// Owning user (client-side filter field, not enforced by the store)
    pub owner_id: UserId,

    /// Title entered in the add-video form
    pub title: String,

    /// Description entered in the add-video form
    pub description: String,

    /// The submitted link to the externally hosted video
    pub source_url: String,

    /// Platform the link was classified as at creation time
    pub platform: Platform,

    /// Resolved preview image URL (or placeholder filename)
    pub preview_image_url: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Add-video form payload, before the store assigns an identity and a
/// preview image has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVideo {
    /// Title, required
    pub title: String,
    /// Description, required
    pub description: String,
    /// Submitted URL, required
    pub source_url: String,
    /// Platform the user selected in the form
    pub platform: Platform,
}

impl NewVideo {
    /// Check that every required field is present and non-blank.
    ///
    /// Runs before any network call; a failure aborts the submission.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(VaultError::validation("title is required"));
        }
        if self.description.trim().is_empty() {
            return Err(VaultError::validation("description is required"));
        }
        if self.source_url.trim().is_empty() {
            return Err(VaultError::validation("video URL is required"));
        }
        Ok(())
    }
}

/// Fully resolved video record handed to the store, which assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVideo {
    /// Owning user
    pub owner_id: UserId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Submitted URL
    pub source_url: String,
    /// Classified platform
    pub platform: Platform,
    /// Resolved preview image URL (or placeholder filename)
    pub preview_image_url: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl CreateVideo {
    /// Materialize the stored video once the store has assigned an id.
    pub fn into_video(self, id: VideoId) -> Video {
        Video {
            id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            source_url: self.source_url,
            platform: self.platform,
            preview_image_url: self.preview_image_url,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewVideo {
        NewVideo {
            title: "Baking bread".into(),
            description: "Sourdough basics".into(),
            source_url: "https://youtu.be/dQw4w9WgXcQ".into(),
            platform: Platform::YouTube,
        }
    }

    #[test]
    fn complete_form_validates() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut missing_title = form();
        missing_title.title = "   ".into();
        assert!(matches!(
            missing_title.validate(),
            Err(VaultError::Validation(_))
        ));

        let mut missing_url = form();
        missing_url.source_url = String::new();
        assert!(missing_url.validate().is_err());
    }

    #[test]
    fn platform_wire_values() {
        assert_eq!(
            serde_json::to_string(&Platform::YouTube).unwrap(),
            "\"YouTube\""
        );
        assert_eq!(
            serde_json::to_string(&Platform::Instagram).unwrap(),
            "\"Instagram\""
        );
    }
}
