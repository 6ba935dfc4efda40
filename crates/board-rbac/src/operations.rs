//! # Operations
//!
//! Defines the operations that can be performed on a post.
//! Operations are what the access policy decides on.

use serde::{Deserialize, Serialize};

/// Operations that can be performed on a post.
///
/// - **View**: Watch the video and read post details
/// - **Edit**: Change title, description, or visibility
/// - **Delete**: Remove the post and its grants
/// - **ManagePermissions**: List, add, and remove per-post grants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// View post.
    ///
    /// Granted by visibility, ownership, admin status, or any grant.
    View,

    /// Edit post.
    ///
    /// Reserved to the author and platform administrators.
    Edit,

    /// Delete post.
    ///
    /// Reserved to the author and platform administrators.
    Delete,

    /// Manage the post's permission grants.
    ///
    /// Same rule as `Edit`.
    ManagePermissions,
}

impl Operation {
    /// Get the string representation of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
            Operation::ManagePermissions => "manage_permissions",
        }
    }

    /// Parse operation from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, supports aliases)
    ///
    /// # Returns
    ///
    /// `Some(Operation)` if valid, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use board_rbac::operations::Operation;
    ///
    /// assert_eq!(Operation::parse("view"), Some(Operation::View));
    /// assert_eq!(Operation::parse("read"), Some(Operation::View)); // Alias
    /// assert_eq!(Operation::parse("update"), Some(Operation::Edit)); // Alias
    /// assert_eq!(Operation::parse("manage-permissions"), Some(Operation::ManagePermissions));
    /// assert_eq!(Operation::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "view" | "read" | "get" | "watch" => Some(Operation::View),
            "edit" | "update" | "write" | "modify" | "put" => Some(Operation::Edit),
            "delete" | "remove" | "destroy" => Some(Operation::Delete),
            "manage_permissions" | "manage-permissions" | "permissions" | "manage" => {
                Some(Operation::ManagePermissions)
            }
            _ => None,
        }
    }

    /// Get all operations.
    pub fn all() -> Vec<Self> {
        vec![
            Operation::View,
            Operation::Edit,
            Operation::Delete,
            Operation::ManagePermissions,
        ]
    }

    /// Check if this operation is reserved to the post's owner (and admins).
    ///
    /// Owner-only operations are never conferred by a permission grant.
    ///
    /// # Example
    ///
    /// ```
    /// use board_rbac::operations::Operation;
    ///
    /// assert!(!Operation::View.is_owner_only());
    /// assert!(Operation::Delete.is_owner_only());
    /// ```
    pub fn is_owner_only(&self) -> bool {
        !matches!(self, Operation::View)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
