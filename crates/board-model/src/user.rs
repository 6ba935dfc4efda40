//! User and principal models
//!
//! This module provides the account types returned by the board service,
//! the `Principal` used for access decisions, and the request payloads for
//! registration, login, and administrative user updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// The identity making a request.
///
/// Only the two facts the access policy needs are carried: the user ID and
/// whether the user is a platform administrator. A principal is derived from
/// the session and never persisted by the client.
///
/// # Examples
///
/// ```
/// use board_model::Principal;
///
/// let member = Principal::member(5);
/// assert!(!member.is_admin);
///
/// let admin = Principal::admin(1);
/// assert!(admin.is_admin);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// User ID
    pub id: i64,

    /// Platform administrator flag
    pub is_admin: bool,
}

impl Principal {
    /// Creates a principal with explicit admin status.
    pub fn new(id: i64, is_admin: bool) -> Self {
        Self { id, is_admin }
    }

    /// Creates a regular (non-admin) principal.
    pub fn member(id: i64) -> Self {
        Self::new(id, false)
    }

    /// Creates a platform administrator principal.
    pub fn admin(id: i64) -> Self {
        Self::new(id, true)
    }
}

/// A user account as returned by the board service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: i64,

    /// Login email
    pub email: String,

    /// Optional display name
    #[serde(default)]
    pub full_name: Option<String>,

    /// Whether the account is active
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Platform administrator flag (absent in some responses)
    #[serde(default)]
    pub is_admin: bool,

    /// Account creation time
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The principal for this user.
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.is_admin)
    }

    /// Display name, falling back to `User #<id>` when no name is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use board_model::User;
    ///
    /// let user: User = serde_json::from_value(serde_json::json!({
    ///     "id": 7,
    ///     "email": "kim@example.com",
    ///     "created_at": "2025-01-01T00:00:00Z"
    /// })).unwrap();
    /// assert_eq!(user.display_name(), "User #7");
    /// ```
    pub fn display_name(&self) -> String {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("User #{}", self.id),
        }
    }

    /// Role label used in listings.
    pub fn role_label(&self) -> &'static str {
        if self.is_admin {
            "Admin"
        } else {
            "User"
        }
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        user.principal()
    }
}

fn default_active() -> bool {
    true
}

/// Registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl RegisterRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            full_name: None,
        }
    }

    /// Set the display name. Blank names are dropped.
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        self.full_name = if full_name.trim().is_empty() {
            None
        } else {
            Some(full_name.trim().to_string())
        };
        self
    }

    /// Check the email shape and the minimum password length.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(())
    }
}

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Reject malformed emails before a sign-in attempt.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_email(&self.email)
    }
}

/// Login response body. The same token is also set as the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Administrative update of a user account.
///
/// Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAdminUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl UserAdminUpdate {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.full_name.is_none()
            && self.is_active.is_none()
            && self.is_admin.is_none()
    }

    /// Reject empty updates and malformed emails.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Minimal structural email check: one `@`, non-empty local part, and a
/// domain containing a dot that does not start or end with it.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidEmail(email.to_string());
    let (local, domain) = email.trim().split_once('@').ok_or_else(invalid)?;

    if local.is_empty() || domain.contains('@') || local.contains(char::is_whitespace) {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }
    Ok(())
}
