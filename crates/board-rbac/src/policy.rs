//! # Access Policy
//!
//! The single decision point for who may do what with a post.
//!
//! | Operation            | Allowed when                                          |
//! |----------------------|-------------------------------------------------------|
//! | `View`               | public, author, admin, or any grant on the post       |
//! | `Edit`               | author or admin                                       |
//! | `Delete`             | author or admin                                       |
//! | `ManagePermissions`  | author or admin                                       |
//!
//! Without a principal every operation is denied. Grants never confer
//! `Edit`, `Delete`, or `ManagePermissions`, whatever their level.
//!
//! These checks decide what a client shows and where it navigates. The
//! service enforces the same rules on every request.

use serde::{Deserialize, Serialize};

use board_model::{Post, Principal};

use crate::grants::{GrantLookup, PermissionLevel};
use crate::operations::Operation;
use crate::routes::Route;

/// Minimum grant level that confers `View`.
pub const VIEW_GRANT_LEVEL: PermissionLevel = PermissionLevel::Read;

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    /// Proceed.
    Allow,
    /// Navigate away instead of proceeding.
    Redirect { route: Route },
    /// Stay, and show this message inline.
    Reject { reason: String },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    /// Redirect target, if this is a redirect.
    pub fn redirect_route(&self) -> Option<Route> {
        match self {
            AccessDecision::Redirect { route } => Some(*route),
            _ => None,
        }
    }

    fn deny(principal: Option<Principal>) -> Self {
        AccessDecision::Redirect {
            route: Route::fallback(principal.is_some()),
        }
    }
}

/// Check whether `principal` may perform `operation` on `post`.
///
/// # Arguments
///
/// * `principal` - The caller, or `None` when unauthenticated
/// * `post` - The post being accessed
/// * `grants` - Grants to consult; grants for other posts are ignored
/// * `operation` - The operation requested
///
/// # Example
///
/// ```
/// use board_model::{Post, Principal};
/// use board_rbac::{can_access, Operation, PermissionGrant};
///
/// # let post: Post = serde_json::from_value(serde_json::json!({
/// #     "id": 9, "title": "t", "video_filename": "f.mp4", "video_original_name": "f.mp4",
/// #     "video_size": 1, "author_id": 7, "is_public": false,
/// #     "created_at": "2025-01-01T00:00:00Z"
/// # })).unwrap();
/// let grants: Vec<PermissionGrant> = Vec::new();
/// let caller = Principal::member(5);
///
/// assert!(!can_access(Some(caller), &post, &grants, Operation::View));
/// assert!(can_access(Some(Principal::member(7)), &post, &grants, Operation::Delete));
/// ```
pub fn can_access<G>(
    principal: Option<Principal>,
    post: &Post,
    grants: &G,
    operation: Operation,
) -> bool
where
    G: GrantLookup + ?Sized,
{
    let Some(principal) = principal else {
        return false;
    };

    if principal.is_admin || principal.id == post.author_id {
        return true;
    }

    match operation {
        Operation::View => {
            post.is_public
                || grants
                    .level_for(post.id, principal.id)
                    .is_some_and(|level| level.satisfies(VIEW_GRANT_LEVEL))
        }
        Operation::Edit | Operation::Delete | Operation::ManagePermissions => false,
    }
}

/// Like [`can_access`], but says where to go on denial.
///
/// Unauthenticated callers are sent to `/login`, everyone else to `/board`.
pub fn decide<G>(
    principal: Option<Principal>,
    post: &Post,
    grants: &G,
    operation: Operation,
) -> AccessDecision
where
    G: GrantLookup + ?Sized,
{
    if can_access(principal, post, grants, operation) {
        AccessDecision::Allow
    } else {
        AccessDecision::deny(principal)
    }
}

/// Operations `principal` may perform on `post`, in `Operation::all()` order.
pub fn allowed_operations<G>(principal: Option<Principal>, post: &Post, grants: &G) -> Vec<Operation>
where
    G: GrantLookup + ?Sized,
{
    Operation::all()
        .into_iter()
        .filter(|op| can_access(principal, post, grants, *op))
        .collect()
}

/// Posts in `posts` that `principal` may view, order preserved.
pub fn visible_posts<'a, G>(
    principal: Option<Principal>,
    posts: &'a [Post],
    grants: &G,
) -> Vec<&'a Post>
where
    G: GrantLookup + ?Sized,
{
    posts
        .iter()
        .filter(|post| can_access(principal, post, grants, Operation::View))
        .collect()
}

/// Guard for the admin area.
///
/// Unauthenticated callers go to `/login`, non-admins to `/board`.
pub fn require_admin(principal: Option<Principal>) -> AccessDecision {
    match principal {
        Some(p) if p.is_admin => AccessDecision::Allow,
        other => AccessDecision::deny(other),
    }
}

/// Guard for pages that only need a session.
pub fn require_session(principal: Option<Principal>) -> AccessDecision {
    match principal {
        Some(_) => AccessDecision::Allow,
        None => AccessDecision::deny(None),
    }
}

/// Administrative actions on a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    /// View the account
    View,
    /// Update the account; `revokes_admin` when the update clears the admin flag
    Update { revokes_admin: bool },
    /// Delete the account and everything it owns
    Delete,
}

/// Check an administrative action on the account `target_user_id`.
///
/// Only admins pass. An admin may not delete their own account or remove
/// their own admin flag; those are rejected inline rather than redirected.
///
/// # Example
///
/// ```
/// use board_model::Principal;
/// use board_rbac::policy::{can_manage_user, AccessDecision, UserAction};
///
/// let admin = Principal::admin(1);
/// assert!(can_manage_user(Some(admin), 2, UserAction::Delete).is_allowed());
/// assert!(matches!(
///     can_manage_user(Some(admin), 1, UserAction::Delete),
///     AccessDecision::Reject { .. }
/// ));
/// ```
pub fn can_manage_user(
    principal: Option<Principal>,
    target_user_id: i64,
    action: UserAction,
) -> AccessDecision {
    let guard = require_admin(principal);
    let Some(admin) = principal.filter(|_| guard.is_allowed()) else {
        return guard;
    };

    let is_self = admin.id == target_user_id;
    match action {
        UserAction::Delete if is_self => AccessDecision::Reject {
            reason: "Cannot delete your own account".to_string(),
        },
        UserAction::Update {
            revokes_admin: true,
        } if is_self => AccessDecision::Reject {
            reason: "Cannot remove your own admin privileges".to_string(),
        },
        _ => AccessDecision::Allow,
    }
}
