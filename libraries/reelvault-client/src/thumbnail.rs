//! Creation-time preview resolution.
//!
//! The only network side effect with uncertain latency in the whole
//! system: the Instagram oEmbed lookup. YouTube previews are synthesized
//! deterministically and never touch the network.

use crate::types::OembedResponse;
use reelvault_core::classify::Classification;
use reelvault_core::embed::{youtube_thumbnail_url, DEFAULT_THUMBNAIL};
use reqwest::Client;
use tracing::{debug, warn};

/// Best-effort thumbnail lookup against a public oEmbed-style endpoint.
#[derive(Clone)]
pub struct ThumbnailClient {
    http: Client,
    oembed_url: String,
}

impl ThumbnailClient {
    pub(crate) fn new(http: Client, oembed_url: String) -> Self {
        Self { http, oembed_url }
    }

    /// Resolve the preview image for a classified URL.
    ///
    /// YouTube is pure; Instagram performs the lookup and degrades to the
    /// fixed placeholder on any failure. Callers must not pass
    /// `Unrecognized` here: classification failure is a submission-blocking
    /// error handled before resolution.
    pub async fn resolve_preview(&self, classification: &Classification) -> Option<String> {
        match classification {
            Classification::YouTube(id) => Some(youtube_thumbnail_url(id)),
            Classification::Instagram(code) => Some(self.instagram_thumbnail(code).await),
            Classification::Unrecognized => None,
        }
    }

    /// Look up an Instagram post's thumbnail; placeholder on any failure.
    pub async fn instagram_thumbnail(&self, post_code: &str) -> String {
        let url = format!(
            "{}/?url=https://instagram.com/p/{}/",
            self.oembed_url, post_code
        );
        debug!(url = %url, "Looking up Instagram thumbnail");

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(post_code = %post_code, error = %e, "Thumbnail lookup failed");
                return DEFAULT_THUMBNAIL.to_string();
            }
        };

        if !response.status().is_success() {
            warn!(post_code = %post_code, status = %response.status(), "Thumbnail lookup rejected");
            return DEFAULT_THUMBNAIL.to_string();
        }

        match response.json::<OembedResponse>().await {
            Ok(OembedResponse {
                thumbnail_url: Some(thumbnail),
            }) => thumbnail,
            Ok(OembedResponse {
                thumbnail_url: None,
            }) => {
                warn!(post_code = %post_code, "Thumbnail field missing from oEmbed response");
                DEFAULT_THUMBNAIL.to_string()
            }
            Err(e) => {
                warn!(post_code = %post_code, error = %e, "Thumbnail response was not valid JSON");
                DEFAULT_THUMBNAIL.to_string()
            }
        }
    }
}
