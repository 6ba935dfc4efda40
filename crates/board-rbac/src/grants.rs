//! # Grants
//!
//! Per-post permission grants. A grant gives one user a permission level on
//! one post. Levels are ordered `read < write < admin`.
//!
//! The authoritative grant store lives on the server; `GrantSet` mirrors its
//! invariants locally: one grant per `(post_id, user_id)` pair, a later grant
//! for the same pair replaces the earlier one, and removal is by pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use board_model::{User, ValidationError, ValidationResult};

/// Permission level carried by a grant.
///
/// Levels are totally ordered; a higher level satisfies every lower one.
///
/// # Example
///
/// ```
/// use board_rbac::grants::PermissionLevel;
///
/// assert!(PermissionLevel::Admin > PermissionLevel::Write);
/// assert!(PermissionLevel::Write.satisfies(PermissionLevel::Read));
/// assert!(!PermissionLevel::Read.satisfies(PermissionLevel::Write));
/// ```
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Read access (the default for new grants)
    #[default]
    Read,
    /// Write access
    Write,
    /// Administrative access
    Admin,
}

impl PermissionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::Read => "read",
            PermissionLevel::Write => "write",
            PermissionLevel::Admin => "admin",
        }
    }

    /// Parse a level (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "read" => Some(PermissionLevel::Read),
            "write" => Some(PermissionLevel::Write),
            "admin" => Some(PermissionLevel::Admin),
            _ => None,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            PermissionLevel::Read,
            PermissionLevel::Write,
            PermissionLevel::Admin,
        ]
    }

    /// Check if this level is at least `required`.
    pub fn satisfies(&self, required: PermissionLevel) -> bool {
        *self >= required
    }
}

impl std::fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permission grant on a post, as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Grant record ID
    pub id: i64,

    /// Post the grant applies to
    pub post_id: i64,

    /// Grantee
    pub user_id: i64,

    /// Granted level
    pub permission_type: PermissionLevel,

    /// When the grant was created
    #[serde(with = "board_model::timestamp")]
    pub created_at: DateTime<Utc>,

    /// Embedded grantee record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl PermissionGrant {
    /// Creates a grant that has not been stored yet (`id` is 0).
    pub fn new(post_id: i64, user_id: i64, level: PermissionLevel) -> Self {
        Self {
            id: 0,
            post_id,
            user_id,
            permission_type: level,
            created_at: Utc::now(),
            user: None,
        }
    }

    /// The `(post_id, user_id)` pair identifying this grant.
    pub fn key(&self) -> (i64, i64) {
        (self.post_id, self.user_id)
    }

    /// Grantee label: email if known, otherwise `User #<id>`.
    pub fn grantee_label(&self) -> String {
        match self.user {
            Some(ref user) => user.email.clone(),
            None => format!("User #{}", self.user_id),
        }
    }
}

/// Request body for adding a grant.
///
/// The target user is identified either by ID or by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_identifier: Option<String>,

    pub permission_type: PermissionLevel,
}

impl GrantRequest {
    /// Grant to a known user ID.
    pub fn for_user(user_id: i64, level: PermissionLevel) -> Self {
        Self {
            user_id: Some(user_id),
            user_identifier: None,
            permission_type: level,
        }
    }

    /// Grant to a user given as free-form input.
    ///
    /// All-digit input is treated as a user ID; anything else is sent as an
    /// email identifier.
    ///
    /// # Example
    ///
    /// ```
    /// use board_rbac::grants::{GrantRequest, PermissionLevel};
    ///
    /// let by_id = GrantRequest::for_identifier(" 42 ", PermissionLevel::Read).unwrap();
    /// assert_eq!(by_id.user_id, Some(42));
    ///
    /// let by_email = GrantRequest::for_identifier("kim@example.com", PermissionLevel::Write).unwrap();
    /// assert_eq!(by_email.user_identifier.as_deref(), Some("kim@example.com"));
    ///
    /// assert!(GrantRequest::for_identifier("   ", PermissionLevel::Read).is_err());
    /// ```
    pub fn for_identifier(identifier: &str, level: PermissionLevel) -> ValidationResult<Self> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ValidationError::EmptyIdentifier);
        }

        if identifier.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(user_id) = identifier.parse::<i64>() {
                return Ok(Self::for_user(user_id, level));
            }
        }

        Ok(Self {
            user_id: None,
            user_identifier: Some(identifier.to_string()),
            permission_type: level,
        })
    }
}

/// Lookup of the level a user holds on a post.
///
/// Implemented for plain grant slices and for `GrantSet`, so the access
/// policy can take either.
pub trait GrantLookup {
    /// Level held by `user_id` on `post_id`, if any grant exists.
    fn level_for(&self, post_id: i64, user_id: i64) -> Option<PermissionLevel>;
}

impl GrantLookup for [PermissionGrant] {
    fn level_for(&self, post_id: i64, user_id: i64) -> Option<PermissionLevel> {
        // Duplicates should not exist; if they do, the strongest wins.
        self.iter()
            .filter(|g| g.post_id == post_id && g.user_id == user_id)
            .map(|g| g.permission_type)
            .max()
    }
}

impl GrantLookup for Vec<PermissionGrant> {
    fn level_for(&self, post_id: i64, user_id: i64) -> Option<PermissionLevel> {
        self.as_slice().level_for(post_id, user_id)
    }
}

/// Local mirror of the grant store, unique per `(post_id, user_id)`.
///
/// # Example
///
/// ```
/// use board_rbac::grants::{GrantLookup, GrantSet, PermissionGrant, PermissionLevel};
///
/// let mut set = GrantSet::new();
/// set.insert(PermissionGrant::new(9, 5, PermissionLevel::Read));
/// set.insert(PermissionGrant::new(9, 5, PermissionLevel::Write)); // replaces
///
/// assert_eq!(set.len(), 1);
/// assert_eq!(set.level_for(9, 5), Some(PermissionLevel::Write));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GrantSet {
    grants: HashMap<(i64, i64), PermissionGrant>,
}

impl GrantSet {
    pub fn new() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    /// Insert a grant, replacing any existing grant for the same pair.
    ///
    /// # Returns
    ///
    /// The replaced grant, if there was one
    pub fn insert(&mut self, grant: PermissionGrant) -> Option<PermissionGrant> {
        self.grants.insert(grant.key(), grant)
    }

    /// Remove exactly the grant for `(post_id, user_id)`.
    pub fn remove(&mut self, post_id: i64, user_id: i64) -> Option<PermissionGrant> {
        self.grants.remove(&(post_id, user_id))
    }

    /// Remove every grant on a post (post deletion cascade).
    ///
    /// # Returns
    ///
    /// Number of grants removed
    pub fn remove_post(&mut self, post_id: i64) -> usize {
        let before = self.grants.len();
        self.grants.retain(|(p, _), _| *p != post_id);
        before - self.grants.len()
    }

    /// Remove every grant held by a user (user deletion cascade).
    pub fn remove_user(&mut self, user_id: i64) -> usize {
        let before = self.grants.len();
        self.grants.retain(|(_, u), _| *u != user_id);
        before - self.grants.len()
    }

    pub fn get(&self, post_id: i64, user_id: i64) -> Option<&PermissionGrant> {
        self.grants.get(&(post_id, user_id))
    }

    /// Grants on one post, ordered by user ID.
    pub fn for_post(&self, post_id: i64) -> Vec<&PermissionGrant> {
        let mut grants: Vec<_> = self
            .grants
            .values()
            .filter(|g| g.post_id == post_id)
            .collect();
        grants.sort_by_key(|g| g.user_id);
        grants
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    pub fn clear(&mut self) {
        self.grants.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PermissionGrant> {
        self.grants.values()
    }
}

impl GrantLookup for GrantSet {
    fn level_for(&self, post_id: i64, user_id: i64) -> Option<PermissionLevel> {
        self.get(post_id, user_id).map(|g| g.permission_type)
    }
}

impl FromIterator<PermissionGrant> for GrantSet {
    fn from_iter<T: IntoIterator<Item = PermissionGrant>>(iter: T) -> Self {
        let mut set = GrantSet::new();
        for grant in iter {
            set.insert(grant);
        }
        set
    }
}
