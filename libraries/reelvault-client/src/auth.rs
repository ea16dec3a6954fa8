//! Identity service calls: email/password sign-in, sign-up, sign-out.

use crate::error::{BackendError, Result};
use crate::types::{SessionResponse, SignInRequest, SignUpRequest};
use reelvault_core::types::UserProfile;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Authentication sub-client for the managed identity service.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Sign in with email and password. Returns a token and the profile.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionResponse> {
        let url = format!("{}/v1/auth/signin", self.base_url);
        debug!(url = %url, email = %email, "Attempting sign-in");

        let request = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(connect_error)?;

        let status = response.status();

        if status.is_success() {
            let session: SessionResponse = response.json().await.map_err(|e| {
                BackendError::ParseError(format!("Failed to parse sign-in response: {}", e))
            })?;

            info!(user_id = %session.user.id, "Sign-in successful");
            Ok(session)
        } else if status.as_u16() == 401 {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Sign-in failed: invalid credentials");
            Err(BackendError::AuthFailed(
                "Invalid email or password".to_string(),
            ))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(BackendError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Register a new account. Returns a signed-in session.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<SessionResponse> {
        let url = format!("{}/v1/auth/signup", self.base_url);
        debug!(url = %url, email = %email, "Attempting sign-up");

        let request = SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            display_name: display_name.map(ToString::to_string),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(connect_error)?;

        let status = response.status();

        if status.is_success() {
            let session: SessionResponse = response.json().await.map_err(|e| {
                BackendError::ParseError(format!("Failed to parse sign-up response: {}", e))
            })?;

            info!(user_id = %session.user.id, "Account created");
            Ok(session)
        } else if status.as_u16() == 409 {
            Err(BackendError::AuthFailed(
                "An account with this email already exists".to_string(),
            ))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(BackendError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Get the profile behind an access token.
    pub async fn current_user(&self, access_token: &str) -> Result<UserProfile> {
        let url = format!("{}/v1/auth/me", self.base_url);
        debug!(url = %url, "Fetching current user");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(connect_error)?;

        let status = response.status();

        if status.is_success() {
            let profile: UserProfile = response.json().await.map_err(|e| {
                BackendError::ParseError(format!("Failed to parse user profile: {}", e))
            })?;
            Ok(profile)
        } else if status.as_u16() == 401 {
            Err(BackendError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(BackendError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Invalidate an access token.
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/v1/auth/signout", self.base_url);
        debug!(url = %url, "Signing out");

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(connect_error)?;

        let status = response.status();

        // An already-expired token still counts as signed out.
        if status.is_success() || status.as_u16() == 401 {
            info!("Signed out");
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(BackendError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

fn connect_error(e: reqwest::Error) -> BackendError {
    if e.is_connect() || e.is_timeout() {
        BackendError::ServerUnreachable(e.to_string())
    } else {
        BackendError::Request(e)
    }
}
