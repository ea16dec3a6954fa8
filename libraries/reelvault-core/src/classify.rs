//! URL classification.
//!
//! One pure function decides which platform a submitted link belongs to
//! and extracts its canonical identifier. The same classification is used
//! at creation time and at playback time, so the two can never disagree.

use crate::error::{Result, VaultError};
use crate::types::Platform;
use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical YouTube watch/embed/short forms. Captures exactly the
/// 11-character video identifier, bounded by `"`, `&`, `?`, `/` or space.
static YOUTUBE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:youtube\.com/(?:[^/]+/[^/]+/|(?:v|embed)/|.*[?&]v=)|youtu\.be/)([^"&?/ ]{11})"#)
        .expect("valid youtube pattern")
});

/// Instagram post/reel forms, including the short `instagr.am` host.
/// Captures the post code up to the next `/` or `?`.
static INSTAGRAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:instagram\.com|instagr\.am)/(?:p|reel)/([^/?]+)")
        .expect("valid instagram pattern")
});

/// Result of classifying a submitted URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Recognized YouTube link carrying the 11-character video id
    YouTube(String),
    /// Recognized Instagram post or reel carrying the post code
    Instagram(String),
    /// No known pattern matched
    Unrecognized,
}

impl Classification {
    /// Platform this classification maps to, if any.
    pub fn platform(&self) -> Option<Platform> {
        match self {
            Classification::YouTube(_) => Some(Platform::YouTube),
            Classification::Instagram(_) => Some(Platform::Instagram),
            Classification::Unrecognized => None,
        }
    }
}

/// Classify a raw URL string.
pub fn classify(url: &str) -> Classification {
    if let Some(captures) = YOUTUBE.captures(url) {
        return Classification::YouTube(captures[1].to_string());
    }
    if let Some(captures) = INSTAGRAM.captures(url) {
        return Classification::Instagram(captures[1].to_string());
    }
    Classification::Unrecognized
}

/// Classify a URL and check it against the platform the user selected.
///
/// An unrecognized URL is a hard failure; so is a recognized URL whose
/// platform disagrees with the selection (a stored flag that contradicts
/// the URL would otherwise change behavior between screens).
pub fn classify_for(url: &str, selected: Platform) -> Result<Classification> {
    let classification = classify(url);
    match classification.platform() {
        None => Err(VaultError::UnrecognizedUrl(url.to_string())),
        Some(actual) if actual != selected => Err(VaultError::PlatformMismatch {
            selected: selected.to_string(),
            classified: actual.to_string(),
        }),
        Some(_) => Ok(classification),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_watch_form() {
        assert_eq!(
            classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Classification::YouTube("dQw4w9WgXcQ".into())
        );
    }

    #[test]
    fn extracts_short_and_embed_forms() {
        for url in [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?list=PLx&v=dQw4w9WgXcQ",
        ] {
            assert_eq!(
                classify(url),
                Classification::YouTube("dQw4w9WgXcQ".into()),
                "failed for {url}"
            );
        }
    }

    #[test]
    fn identifier_is_exactly_eleven_chars() {
        // Trailing query parameters must not leak into the id.
        let c = classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s");
        match c {
            Classification::YouTube(id) => assert_eq!(id.len(), 11),
            other => panic!("expected YouTube, got {other:?}"),
        }
    }

    #[test]
    fn instagram_post_and_reel_both_classify() {
        assert_eq!(
            classify("https://www.instagram.com/p/Cxyz123AbCd/"),
            Classification::Instagram("Cxyz123AbCd".into())
        );
        assert_eq!(
            classify("https://www.instagram.com/reel/Cxyz123AbCd?igsh=1"),
            Classification::Instagram("Cxyz123AbCd".into())
        );
        assert_eq!(
            classify("https://instagr.am/p/Cxyz123AbCd/"),
            Classification::Instagram("Cxyz123AbCd".into())
        );
    }

    #[test]
    fn unknown_urls_are_unrecognized() {
        assert_eq!(
            classify("https://example.com/video"),
            Classification::Unrecognized
        );
        assert_eq!(classify(""), Classification::Unrecognized);
    }

    #[test]
    fn selected_platform_must_match_url() {
        assert!(classify_for("https://youtu.be/dQw4w9WgXcQ", Platform::YouTube).is_ok());

        let err = classify_for("https://youtu.be/dQw4w9WgXcQ", Platform::Instagram).unwrap_err();
        assert!(matches!(err, VaultError::PlatformMismatch { .. }));

        let err = classify_for("https://example.com/video", Platform::YouTube).unwrap_err();
        assert!(matches!(err, VaultError::UnrecognizedUrl(_)));
    }
}
