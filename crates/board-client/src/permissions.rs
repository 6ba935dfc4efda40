//! Per-post permission grants (`/posts/{id}/permissions`).

use board_rbac::{GrantRequest, PermissionGrant};
use reqwest::Method;
use tracing::{debug, instrument};

use crate::api::{ApiClient, MessageResponse};
use crate::error::ApiResult;

impl ApiClient {
    /// Grants on a post. Requires author or admin.
    #[instrument(skip(self))]
    pub async fn list_grants(&self, post_id: i64) -> ApiResult<Vec<PermissionGrant>> {
        self.get_json(&format!("/posts/{}/permissions", post_id))
            .await
    }

    /// Grant access to a user, by id or email.
    #[instrument(skip(self, request), fields(level = %request.permission_type))]
    pub async fn add_grant(
        &self,
        post_id: i64,
        request: &GrantRequest,
    ) -> ApiResult<PermissionGrant> {
        debug!("Granting {} on post {}", request.permission_type, post_id);
        self.send_json(
            Method::POST,
            &format!("/posts/{}/permissions", post_id),
            request,
        )
        .await
    }

    /// Remove the grant held by `user_id` on a post.
    #[instrument(skip(self))]
    pub async fn remove_grant(&self, post_id: i64, user_id: i64) -> ApiResult<MessageResponse> {
        self.send_empty(
            Method::DELETE,
            &format!("/posts/{}/permissions/{}", post_id, user_id),
        )
        .await
    }
}
