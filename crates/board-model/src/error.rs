//! Validation errors for user input
//!
//! These mirror the checks the board service performs, so invalid input can
//! be rejected before a request is sent.

use thiserror::Error;

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Post title is empty after trimming
    #[error("Title is required")]
    EmptyTitle,

    /// Post title exceeds the maximum length
    #[error("Title must be at most {max} characters")]
    TitleTooLong { max: usize },

    /// Post description exceeds the maximum length
    #[error("Description must be at most {max} characters")]
    DescriptionTooLong { max: usize },

    /// No video file was provided
    #[error("Please select a video file")]
    MissingFile,

    /// Video file has an extension the service does not accept
    #[error("File extension not allowed: {0}. Allowed: .mp4, .webm, .mov")]
    UnsupportedExtension(String),

    /// Video file exceeds the upload limit
    #[error("File too large ({} bytes). Maximum size: {}MB", .size, .max / (1024 * 1024))]
    FileTooLarge { size: u64, max: u64 },

    /// Registration password is too short
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// Email address is malformed
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Grant target identifier is blank
    #[error("User email or ID is required")]
    EmptyIdentifier,

    /// Update request carries no fields
    #[error("Nothing to update")]
    EmptyUpdate,
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
