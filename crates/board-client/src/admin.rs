//! Admin endpoints (`/admin/*`). The service rejects non-admins with 403.

use board_model::{AdminStats, Post, User, UserAdminUpdate};
use reqwest::Method;
use tracing::instrument;

use crate::api::{ApiClient, MessageResponse};
use crate::error::ApiResult;

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn admin_stats(&self) -> ApiResult<AdminStats> {
        self.get_json("/admin/stats").await
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.get_json("/admin/users").await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: i64) -> ApiResult<User> {
        self.get_json(&format!("/admin/users/{}", user_id)).await
    }

    /// Update a user's email, name, active flag, or admin flag.
    #[instrument(skip(self, update))]
    pub async fn update_user(&self, user_id: i64, update: &UserAdminUpdate) -> ApiResult<User> {
        update.validate()?;
        self.send_json(Method::PUT, &format!("/admin/users/{}", user_id), update)
            .await
    }

    /// Delete a user along with their posts and grants.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: i64) -> ApiResult<MessageResponse> {
        self.send_empty(Method::DELETE, &format!("/admin/users/{}", user_id))
            .await
    }

    /// Every post, regardless of visibility.
    #[instrument(skip(self))]
    pub async fn admin_posts(&self) -> ApiResult<Vec<Post>> {
        self.get_json("/admin/posts").await
    }
}
