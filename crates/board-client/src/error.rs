//! Client error types.

use board_model::ValidationError;
use board_rbac::Route;
use thiserror::Error;

use crate::config::ConfigError;

/// Board API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned a non-2xx response.
    ///
    /// `message` is the response body, or `HTTP {status}` when it was empty.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Client could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input was rejected before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// How a failure should be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Navigate away instead of showing an error
    Redirect(Route),
    /// Show the message in place, with a retry affordance
    Inline(String),
}

impl ApiError {
    /// Build a status error from a response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            body.to_string()
        };
        ApiError::Status { status, message }
    }

    /// HTTP status, if the service answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a 401 or 403.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status_code(), Some(401) | Some(403))
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// The `detail` field of a JSON error body, if there is one.
    pub fn detail(&self) -> Option<String> {
        let ApiError::Status { message, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(message).ok()?;
        match value.get("detail")? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Classify this failure.
    ///
    /// 401 redirects to `/login`, 403 to `/board`. Everything else is shown
    /// inline.
    pub fn disposition(&self) -> Disposition {
        match self.status_code() {
            Some(401) => Disposition::Redirect(Route::Login),
            Some(403) => Disposition::Redirect(Route::Board),
            _ => Disposition::Inline(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_body_text() {
        let err = ApiError::from_status(404, r#"{"detail":"Post not found"}"#);
        assert_eq!(err.to_string(), r#"{"detail":"Post not found"}"#);
        assert_eq!(err.detail().as_deref(), Some("Post not found"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_empty_body_falls_back_to_status() {
        let err = ApiError::from_status(502, "");
        assert_eq!(err.to_string(), "HTTP 502");
        assert!(err.detail().is_none());
    }

    #[test]
    fn test_disposition() {
        assert_eq!(
            ApiError::from_status(401, "").disposition(),
            Disposition::Redirect(Route::Login)
        );
        assert_eq!(
            ApiError::from_status(403, "Not authorized").disposition(),
            Disposition::Redirect(Route::Board)
        );
        assert_eq!(
            ApiError::from_status(500, "boom").disposition(),
            Disposition::Inline("boom".to_string())
        );

        let err: ApiError = ValidationError::EmptyTitle.into();
        assert!(!err.is_auth_failure());
        assert!(matches!(err.disposition(), Disposition::Inline(_)));
    }
}
