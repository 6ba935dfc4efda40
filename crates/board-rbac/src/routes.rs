//! # Routes
//!
//! Navigation targets used when an access check fails.
//! Denials never surface as errors; the caller is sent somewhere else.

use serde::{Deserialize, Serialize};

/// A navigation target in the board application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "route", content = "id", rename_all = "snake_case")]
pub enum Route {
    /// Sign-in page (unauthenticated callers)
    Login,
    /// Main feed (authenticated callers denied something)
    Board,
    /// Single post
    Post(i64),
    /// Permission manager for a post
    PostPermissions(i64),
    /// Upload form
    Upload,
    /// Admin dashboard
    Admin,
    /// Admin user list
    AdminUsers,
    /// Admin user editor
    AdminUser(i64),
    /// Admin post list
    AdminPosts,
}

impl Route {
    /// Path for this route.
    ///
    /// # Example
    ///
    /// ```
    /// use board_rbac::routes::Route;
    ///
    /// assert_eq!(Route::Login.path(), "/login");
    /// assert_eq!(Route::PostPermissions(9).path(), "/admin/posts/9/permissions");
    /// ```
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Board => "/board".to_string(),
            Route::Post(id) => format!("/board/{}", id),
            Route::PostPermissions(id) => format!("/admin/posts/{}/permissions", id),
            Route::Upload => "/upload".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::AdminUsers => "/admin/users".to_string(),
            Route::AdminUser(id) => format!("/admin/users/{}", id),
            Route::AdminPosts => "/admin/posts".to_string(),
        }
    }

    /// Where a denied caller goes: `/login` without a session, else `/board`.
    pub fn fallback(authenticated: bool) -> Self {
        if authenticated {
            Route::Board
        } else {
            Route::Login
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
