/// CLI configuration
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Base URL of the managed backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// oEmbed endpoint for Instagram thumbnail lookups
    #[serde(default)]
    pub oembed_url: Option<String>,

    /// Sign-in email
    pub email: Option<String>,

    /// Sign-in password
    pub password: Option<String>,
}

fn default_backend_url() -> String {
    "https://api.reelvault.app".to_string()
}

impl CliConfig {
    /// Load configuration from file and environment
    pub fn load(config_file: Option<&str>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from(config_file.unwrap_or("reelvault.toml"));
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with REELVAULT_).
        // The struct is flat, so variable names map one-to-one onto fields
        // (REELVAULT_BACKEND_URL -> backend_url); no key separator.
        settings = settings
            .add_source(config::Environment::with_prefix("REELVAULT").try_parsing(true));

        settings
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Credentials, required for every command except `register`.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        let email = self
            .email
            .as_deref()
            .context("email is required (set REELVAULT_EMAIL or the config file)")?;
        let password = self
            .password
            .as_deref()
            .context("password is required (set REELVAULT_PASSWORD or the config file)")?;
        Ok((email, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test for all REELVAULT_* handling: the process environment is
    // shared, so sequencing the cases inside one test keeps them from
    // racing each other.
    #[test]
    fn environment_variables_override_the_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.backend_url, default_backend_url());
        assert_eq!(config.oembed_url, None);

        std::env::set_var("REELVAULT_BACKEND_URL", "https://override.example.com");
        std::env::set_var("REELVAULT_OEMBED_URL", "https://oembed.example.com");
        std::env::set_var("REELVAULT_EMAIL", "ada@example.com");

        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.backend_url, "https://override.example.com");
        assert_eq!(config.oembed_url.as_deref(), Some("https://oembed.example.com"));
        assert_eq!(config.email.as_deref(), Some("ada@example.com"));

        std::env::remove_var("REELVAULT_BACKEND_URL");
        std::env::remove_var("REELVAULT_OEMBED_URL");
        std::env::remove_var("REELVAULT_EMAIL");
    }

    #[test]
    fn credentials_require_both_fields() {
        let config = CliConfig {
            backend_url: default_backend_url(),
            oembed_url: None,
            email: Some("ada@example.com".to_string()),
            password: None,
        };
        assert!(config.credentials().is_err());
    }
}
