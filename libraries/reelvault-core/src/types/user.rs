/// User profile type
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// Externally managed identity.
///
/// The application never mutates this directly; it only observes it
/// through sign-in, sign-up, and the session-change stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier
    pub id: UserId,

    /// Sign-in email
    pub email: String,

    /// Optional display name
    pub display_name: Option<String>,
}

impl UserProfile {
    /// Name shown on the profile screen, falling back to the email.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}
