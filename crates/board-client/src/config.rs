//! Client configuration.
//!
//! Provides the service endpoint, timeout and TLS settings for the board
//! API client. Configuration is loaded from environment variables with
//! defaults suitable for local development.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Configuration for the board API client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Origin of the service (e.g., "https://board.example.com").
    pub base_url: String,

    /// Path prefix every API route lives under.
    pub api_prefix: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Whether to verify TLS certificates (disable only for testing).
    pub verify_tls: bool,

    /// Pre-existing `access_token` cookie value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl Default for ClientConfig {
    /// Returns default configuration suitable for local development.
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_prefix: "/api".to_string(),
            timeout_secs: 30,
            verify_tls: true,
            session_token: None,
        }
    }
}

impl ClientConfig {
    /// Configuration for a service at `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BOARD_API_URL`: Service URL (default: http://localhost:8000)
    /// - `BOARD_API_PREFIX`: API path prefix (default: /api)
    /// - `BOARD_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    /// - `BOARD_VERIFY_TLS`: Whether to verify TLS (default: true)
    /// - `BOARD_SESSION_TOKEN`: Session cookie to start with
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            base_url: std::env::var("BOARD_API_URL").unwrap_or(default.base_url),
            api_prefix: std::env::var("BOARD_API_PREFIX").unwrap_or(default.api_prefix),
            timeout_secs: std::env::var("BOARD_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.timeout_secs),
            verify_tls: std::env::var("BOARD_VERIFY_TLS")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(default.verify_tls),
            session_token: std::env::var("BOARD_SESSION_TOKEN")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build a full API URL by appending a path to the base URL and prefix.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        let path = path.trim_start_matches('/');

        if prefix.is_empty() {
            format!("{}/{}", base, path)
        } else {
            format!("{}/{}/{}", base, prefix, path)
        }
    }

    /// Parsed service origin.
    pub fn base(&self) -> Result<reqwest::Url, ConfigError> {
        reqwest::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid("BOARD_API_URL", e.to_string()))
    }

    /// Check that the configuration can be used to build a client.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base()?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "BOARD_API_URL",
                format!("unsupported scheme '{}'", base.scheme()),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "BOARD_TIMEOUT_SECS",
                "timeout must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.verify_tls);
        assert!(config.session_token.is_none());
    }

    #[test]
    fn test_url() {
        let config = ClientConfig::new("https://board.example.com");
        assert_eq!(config.url("/posts"), "https://board.example.com/api/posts");
        assert_eq!(config.url("posts/3"), "https://board.example.com/api/posts/3");
    }

    #[test]
    fn test_url_trailing_slashes() {
        let mut config = ClientConfig::new("https://board.example.com/");
        config.api_prefix = "/api/".to_string();
        assert_eq!(config.url("/auth/me"), "https://board.example.com/api/auth/me");

        config.api_prefix = String::new();
        assert_eq!(config.url("/auth/me"), "https://board.example.com/auth/me");
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::default().validate().is_ok());

        let config = ClientConfig::new("not a url");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("ftp://board.example.com");
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("BOARD_TIMEOUT_SECS"));
    }
}
