//! Thumbnail and embed resolution for already-classified URLs.
//!
//! Everything here is a pure function; the one network side effect in the
//! whole system (the Instagram oEmbed lookup at creation time) lives in
//! the backend client crate.

use crate::classify::{classify, Classification};
use crate::types::Video;

/// Fallback filename stored when the Instagram thumbnail lookup fails.
pub const DEFAULT_THUMBNAIL: &str = "default_thumbnail.jpg";

/// Generic placeholder asset for videos with no stored preview.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Static local asset shown for Instagram videos at display time.
/// Instagram preview URLs expire, so stored ones are never trusted.
pub const INSTAGRAM_THUMBNAIL: &str = "/components/instagram.jpeg";

/// Deterministic YouTube thumbnail for an extracted 11-character id.
pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/0.jpg")
}

/// Embed URL for an Instagram post code.
///
/// Pure function of the code: `/p/` and `/reel/` source paths both map
/// to the same `/p/<code>/embed/captioned` player page.
pub fn instagram_embed_url(post_code: &str) -> String {
    format!("https://www.instagram.com/p/{post_code}/embed/captioned")
}

/// How a stored video should be rendered at playback time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackTarget {
    /// Render an Instagram embed iframe at this URL
    Embed(String),
    /// Hand this URL to the generic embeddable player
    Player(String),
}

impl PlaybackTarget {
    /// The URL to load, whichever way it is rendered.
    pub fn url(&self) -> &str {
        match self {
            PlaybackTarget::Embed(url) | PlaybackTarget::Player(url) => url,
        }
    }
}

/// Resolve the playback target for a stored video.
///
/// Driven by classifying the stored URL, not by the stored platform flag,
/// so a record whose flag and URL disagree still plays the way the URL
/// dictates.
pub fn playback_target(video: &Video) -> PlaybackTarget {
    match classify(&video.source_url) {
        Classification::Instagram(code) => PlaybackTarget::Embed(instagram_embed_url(&code)),
        _ => PlaybackTarget::Player(video.source_url.clone()),
    }
}

/// Resolve the thumbnail for an already-stored video.
///
/// Never re-fetches: Instagram links map to the static local asset, and
/// everything else uses the stored preview, falling back to the generic
/// placeholder when absent.
pub fn display_thumbnail(video: &Video) -> &str {
    if matches!(classify(&video.source_url), Classification::Instagram(_)) {
        return INSTAGRAM_THUMBNAIL;
    }
    if video.preview_image_url.is_empty() {
        PLACEHOLDER_IMAGE
    } else {
        &video.preview_image_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Platform, UserId, VideoId};
    use chrono::Utc;

    fn stored(url: &str, platform: Platform, preview: &str) -> Video {
        Video {
            id: VideoId::new("v-1"),
            owner_id: UserId::new("u-1"),
            title: "Clip".into(),
            description: "A clip".into(),
            source_url: url.into(),
            platform,
            preview_image_url: preview.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn youtube_thumbnail_is_pure_function_of_id() {
        assert_eq!(
            youtube_thumbnail_url("dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg"
        );
    }

    #[test]
    fn post_and_reel_share_one_embed_url() {
        let video = stored(
            "https://www.instagram.com/reel/Cxyz123AbCd/",
            Platform::Instagram,
            DEFAULT_THUMBNAIL,
        );
        assert_eq!(
            playback_target(&video),
            PlaybackTarget::Embed("https://www.instagram.com/p/Cxyz123AbCd/embed/captioned".into())
        );
    }

    #[test]
    fn non_instagram_urls_go_to_the_player() {
        let video = stored(
            "https://youtu.be/dQw4w9WgXcQ",
            Platform::YouTube,
            "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg",
        );
        assert_eq!(
            playback_target(&video),
            PlaybackTarget::Player("https://youtu.be/dQw4w9WgXcQ".into())
        );
    }

    #[test]
    fn display_thumbnail_never_refetches() {
        let insta = stored(
            "https://www.instagram.com/p/Cxyz123AbCd/",
            Platform::Instagram,
            "https://scontent.example/expired.jpg",
        );
        assert_eq!(display_thumbnail(&insta), INSTAGRAM_THUMBNAIL);

        let yt = stored(
            "https://youtu.be/dQw4w9WgXcQ",
            Platform::YouTube,
            "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg",
        );
        assert_eq!(display_thumbnail(&yt), yt.preview_image_url);

        let bare = stored("https://youtu.be/dQw4w9WgXcQ", Platform::YouTube, "");
        assert_eq!(display_thumbnail(&bare), PLACEHOLDER_IMAGE);
    }
}
