//! Remote document store: the `videos` and `lists` collections.
//!
//! Documents are parsed into the typed records at this boundary; anything
//! that does not fit the expected shape is rejected with a distinct
//! malformed-record error instead of leaking loose fields upward.

use crate::error::BackendError;
use async_trait::async_trait;
use reelvault_core::error::{Result, VaultError};
use reelvault_core::storage::{DocumentStore, VideoWatch};
use reelvault_core::types::{
    CreateList, CreateVideo, ListId, UserId, Video, VideoId, VideoList, VideoSnapshot,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Client for the backend's document collections.
///
/// Obtained from `BackendClient::documents()`; carries its own copy of
/// the access token, so a sign-out elsewhere does not invalidate an
/// in-flight operation mid-sequence.
#[derive(Clone, Debug)]
pub struct DocumentsClient {
    http: Client,
    base_url: String,
    access_token: String,
    poll_interval: Duration,
}

impl DocumentsClient {
    pub(crate) fn new(
        http: Client,
        base_url: String,
        access_token: String,
        poll_interval: Duration,
    ) -> Self {
        Self {
            http,
            base_url,
            access_token,
            poll_interval,
        }
    }

    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<Response, BackendError> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    BackendError::ServerUnreachable(e.to_string())
                } else {
                    BackendError::Request(e)
                }
            })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(BackendError::AuthRequired);
        }
        Ok(response)
    }

    async fn server_error(response: Response) -> BackendError {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        BackendError::ServerError {
            status: status.as_u16(),
            message,
        }
    }

    /// Send a request where any non-success status is an error.
    async fn send_checked(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<Response, BackendError> {
        let response = self.dispatch(request).await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::server_error(response).await)
        }
    }

    /// Send a request where 404 is an expected outcome: point reads of a
    /// document that may be gone, and deletes of one already deleted.
    async fn send_allow_missing(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<Response, BackendError> {
        let response = self.dispatch(request).await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(response)
        } else {
            Err(Self::server_error(response).await)
        }
    }

    /// Parse one document, attaching collection and id to parse failures.
    async fn parse_record<T: DeserializeOwned>(
        response: Response,
        collection: &'static str,
        id: &str,
    ) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|e| VaultError::network(e.to_string()))?;
        serde_json::from_str(&body)
            .map_err(|e| VaultError::malformed(collection, id, e.to_string()))
    }

    /// Parse a filtered read, rejecting each malformed record individually
    /// so the error names the offending document.
    async fn parse_collection<T: DeserializeOwned>(
        response: Response,
        collection: &'static str,
    ) -> Result<Vec<T>> {
        let raw: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| VaultError::malformed(collection, "?", e.to_string()))?;

        raw.into_iter()
            .map(|value| {
                let id = value
                    .get("id")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("?")
                    .to_string();
                serde_json::from_value(value)
                    .map_err(|e| VaultError::malformed(collection, id, e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl DocumentStore for DocumentsClient {
    async fn create_video(&self, video: CreateVideo) -> Result<Video> {
        let url = format!("{}/v1/videos", self.base_url);
        debug!(url = %url, "Creating video document");

        let response = self.send_checked(self.http.post(&url).json(&video)).await?;
        Self::parse_record(response, "videos", "new").await
    }

    async fn get_video(&self, id: &VideoId) -> Result<Option<Video>> {
        let url = format!("{}/v1/videos/{}", self.base_url, id);
        let response = self.send_allow_missing(self.http.get(&url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(
            Self::parse_record(response, "videos", id.as_str()).await?,
        ))
    }

    async fn delete_video(&self, id: &VideoId) -> Result<()> {
        let url = format!("{}/v1/videos/{}", self.base_url, id);
        debug!(url = %url, video_id = %id, "Deleting video");

        // Already deleted is fine.
        let _ = self.send_allow_missing(self.http.delete(&url)).await?;
        Ok(())
    }

    async fn videos_for_owner(&self, owner: &UserId) -> Result<Vec<Video>> {
        let url = format!("{}/v1/videos", self.base_url);
        let response = self
            .send_checked(self.http.get(&url).query(&[("owner", owner.as_str())]))
            .await?;
        Self::parse_collection(response, "videos").await
    }

    async fn watch_videos(&self, owner: &UserId) -> Result<VideoWatch> {
        let initial = self.videos_for_owner(owner).await?;
        let (tx, rx) = watch::channel(initial.clone());

        let client = self.clone();
        let owner = owner.clone();
        let mut last = initial;

        // The backend has no push channel; the subscription is a polling
        // loop that publishes whenever the filtered read changes.
        let feeder = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(client.poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            ticker.tick().await; // first tick fires immediately

            loop {
                ticker.tick().await;
                match client.videos_for_owner(&owner).await {
                    Ok(current) => {
                        if current != last {
                            last = current.clone();
                            if tx.send(current).is_err() {
                                // Watch handle dropped; stop polling.
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        // Transient failure: keep the last snapshot, poll again.
                        warn!(owner = %owner, error = %e, "videos watch poll failed");
                    }
                }
                if tx.is_closed() {
                    break;
                }
            }
        });

        Ok(VideoWatch::new(rx, Some(feeder)))
    }

    async fn create_list(&self, list: CreateList) -> Result<VideoList> {
        let url = format!("{}/v1/lists", self.base_url);
        debug!(url = %url, "Creating list document");

        let response = self.send_checked(self.http.post(&url).json(&list)).await?;
        Self::parse_record(response, "lists", "new").await
    }

    async fn get_list(&self, id: &ListId) -> Result<Option<VideoList>> {
        let url = format!("{}/v1/lists/{}", self.base_url, id);
        let response = self.send_allow_missing(self.http.get(&url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(
            Self::parse_record(response, "lists", id.as_str()).await?,
        ))
    }

    async fn update_list_videos(&self, id: &ListId, videos: Vec<VideoSnapshot>) -> Result<()> {
        let url = format!("{}/v1/lists/{}/videos", self.base_url, id);
        debug!(url = %url, list_id = %id, count = videos.len(), "Replacing list snapshots");

        let response = self
            .send_allow_missing(self.http.put(&url).json(&videos))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(VaultError::ListNotFound(id.clone()));
        }
        Ok(())
    }

    async fn delete_list(&self, id: &ListId) -> Result<()> {
        let url = format!("{}/v1/lists/{}", self.base_url, id);
        debug!(url = %url, list_id = %id, "Deleting list");

        let _ = self.send_allow_missing(self.http.delete(&url)).await?;
        Ok(())
    }

    async fn lists_for_owner(&self, owner: &UserId) -> Result<Vec<VideoList>> {
        let url = format!("{}/v1/lists", self.base_url);
        let response = self
            .send_checked(self.http.get(&url).query(&[("owner", owner.as_str())]))
            .await?;
        Self::parse_collection(response, "lists").await
    }
}
