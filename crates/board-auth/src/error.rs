//! Error types for session operations
//!
//! This module defines the errors surfaced by sign-in and sign-out. A failed
//! identity probe is not an error: it resolves the session to "signed out".

use thiserror::Error;

/// Session error types.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity provider rejected the sign-in
    #[error("{0}")]
    SignInFailed(String),

    /// Sign-in succeeded but the follow-up probe found no user
    #[error("Signed in, but the session could not be confirmed")]
    SessionNotEstablished,

    /// The identity provider failed to end the session
    #[error("Sign-out failed: {0}")]
    SignOutFailed(String),

    /// Input failed client-side validation
    #[error(transparent)]
    Invalid(#[from] board_model::ValidationError),
}

/// Result type for session operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Check if this error should be logged at error level.
    ///
    /// Rejected credentials and bad input are expected and are not.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AuthError::SessionNotEstablished | AuthError::SignOutFailed(_)
        )
    }

    /// Get error code for display and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::SignInFailed(_) => "SIGN_IN_FAILED",
            AuthError::SessionNotEstablished => "SESSION_NOT_ESTABLISHED",
            AuthError::SignOutFailed(_) => "SIGN_OUT_FAILED",
            AuthError::Invalid(_) => "INVALID_INPUT",
        }
    }
}
