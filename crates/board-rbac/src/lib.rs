//! # Board RBAC (Post Access Control)
//!
//! This crate provides the access policy for the video board,
//! deciding who may view, edit, delete, or manage permissions on a post.
//!
//! ## Overview
//!
//! The board-rbac crate handles:
//! - **Operations**: What can be done to a post
//! - **Grants**: Per-post permission levels (`read < write < admin`)
//! - **Policy**: The single `can_access` decision and its redirect form
//! - **Routes**: Where a denied caller is sent
//!
//! ## Architecture
//!
//! ```text
//! can_access(principal?, post, grants, operation) -> bool
//!
//! Implicit admin-equivalent rights:
//!   post.author_id == principal.id
//!   principal.is_admin
//!
//! Explicit grants (unique per post/user):
//!   read | write | admin  ─→ View only
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use board_model::Principal;
//! use board_rbac::{GrantSet, Operation, PermissionGrant, PermissionLevel};
//!
//! let mut grants = GrantSet::new();
//! grants.insert(PermissionGrant::new(9, 5, PermissionLevel::Read));
//!
//! // A later grant for the same post/user pair replaces the earlier one
//! grants.insert(PermissionGrant::new(9, 5, PermissionLevel::Write));
//! assert_eq!(grants.len(), 1);
//!
//! assert_eq!(Operation::parse("update"), Some(Operation::Edit));
//! ```
//!
//! ## Denials
//!
//! The policy never returns an error. `decide` turns a denial into a
//! redirect: `/login` without a principal, `/board` otherwise. The check is
//! advisory; the service enforces the same rules.

pub mod grants;
pub mod operations;
pub mod policy;
pub mod routes;

// Re-export main types for convenience
pub use grants::{GrantLookup, GrantRequest, GrantSet, PermissionGrant, PermissionLevel};
pub use operations::Operation;
pub use policy::{
    allowed_operations, can_access, can_manage_user, decide, require_admin, require_session,
    visible_posts, AccessDecision, UserAction,
};
pub use routes::Route;
