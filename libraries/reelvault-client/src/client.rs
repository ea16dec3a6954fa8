//! Main client for the Reelvault managed backend.

use crate::auth::AuthClient;
use crate::documents::DocumentsClient;
use crate::error::{BackendError, Result};
use crate::thumbnail::ThumbnailClient;
use crate::types::{BackendConfig, DEFAULT_POLL_SECS};
use reelvault_core::types::UserProfile;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};

/// Client for the managed backend: identity service, document store,
/// and thumbnail lookup.
///
/// # Example
///
/// ```ignore
/// use reelvault_client::{BackendClient, BackendConfig};
///
/// let client = BackendClient::new(BackendConfig::new("https://api.reelvault.app"))?;
/// let profile = client.sign_in("ada@example.com", "hunter2").await?;
/// let documents = client.documents().await?;
/// let videos = documents.videos_for_owner(&profile.id).await?;
/// ```
pub struct BackendClient {
    http: Client,
    config: Arc<RwLock<BackendConfig>>,
    session: watch::Sender<Option<UserProfile>>,
    poll_interval: Duration,
}

impl BackendClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(BackendError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(BackendError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let normalized = BackendConfig {
            base_url,
            oembed_url: config.oembed_url.trim_end_matches('/').to_string(),
            access_token: config.access_token,
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Reelvault/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(BackendError::Request)?;

        let (session, _) = watch::channel(None);

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized)),
            session,
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
        })
    }

    /// Override the videos-watch polling interval (tests shrink this).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Get the backend base URL.
    pub async fn base_url(&self) -> String {
        self.config.read().await.base_url.clone()
    }

    /// Check whether the client holds an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// The session-change stream: emits the current profile on sign-in
    /// and `None` on sign-out. Subscribers see the latest value first.
    pub fn session(&self) -> watch::Receiver<Option<UserProfile>> {
        self.session.subscribe()
    }

    /// Sign in with email and password; stores the token on success.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile> {
        let base_url = self.base_url().await;
        let auth = AuthClient::new(&self.http, &base_url);
        let session = auth.sign_in(email, password).await?;

        self.config.write().await.access_token = Some(session.access_token);
        let _ = self.session.send(Some(session.user.clone()));
        Ok(session.user)
    }

    /// Register a new account; the returned session is already signed in.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<UserProfile> {
        let base_url = self.base_url().await;
        let auth = AuthClient::new(&self.http, &base_url);
        let session = auth.sign_up(email, password, display_name).await?;

        self.config.write().await.access_token = Some(session.access_token);
        let _ = self.session.send(Some(session.user.clone()));
        Ok(session.user)
    }

    /// Sign out: best-effort server-side invalidation, then drop the token.
    pub async fn sign_out(&self) -> Result<()> {
        let (base_url, token) = {
            let config = self.config.read().await;
            (config.base_url.clone(), config.access_token.clone())
        };

        if let Some(token) = token {
            let auth = AuthClient::new(&self.http, &base_url);
            if let Err(e) = auth.sign_out(&token).await {
                // Server-side invalidation is best-effort; the local
                // session is cleared either way.
                warn!(error = %e, "Server-side sign-out failed");
            }
        }

        self.config.write().await.access_token = None;
        let _ = self.session.send(None);
        info!("Session cleared");
        Ok(())
    }

    /// Fetch the profile for the current token.
    pub async fn current_user(&self) -> Result<UserProfile> {
        let (base_url, token) = {
            let config = self.config.read().await;
            (config.base_url.clone(), config.access_token.clone())
        };
        let token = token.ok_or(BackendError::AuthRequired)?;

        let auth = AuthClient::new(&self.http, &base_url);
        auth.current_user(&token).await
    }

    /// Get a documents client for the `videos` and `lists` collections.
    ///
    /// Returns an error if not signed in.
    pub async fn documents(&self) -> Result<DocumentsClient> {
        let config = self.config.read().await;
        let token = config
            .access_token
            .clone()
            .ok_or(BackendError::AuthRequired)?;

        Ok(DocumentsClient::new(
            self.http.clone(),
            config.base_url.clone(),
            token,
            self.poll_interval,
        ))
    }

    /// Get the best-effort thumbnail lookup client. No authentication.
    pub async fn thumbnails(&self) -> ThumbnailClient {
        let config = self.config.read().await;
        ThumbnailClient::new(self.http.clone(), config.oembed_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_validation() {
        assert!(BackendClient::new(BackendConfig::new("https://example.com")).is_ok());
        assert!(BackendClient::new(BackendConfig::new("http://localhost:8080")).is_ok());

        assert!(BackendClient::new(BackendConfig::new("")).is_err());
        assert!(BackendClient::new(BackendConfig::new("not-a-url")).is_err());
        assert!(BackendClient::new(BackendConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn url_normalization_strips_trailing_slashes() {
        let client =
            BackendClient::new(BackendConfig::new("https://example.com///")).expect("valid url");

        let url = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(client.base_url());
        assert_eq!(url, "https://example.com");
    }
}
