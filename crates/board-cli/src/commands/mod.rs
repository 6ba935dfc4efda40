pub mod admin;
pub mod auth;
pub mod grants;
pub mod posts;
pub mod stream;

use anyhow::Result;

use board_auth::Session;
use board_client::ApiClient;
use board_model::{Post, Principal};
use board_rbac::{AccessDecision, Operation};

use crate::cli::OutputFormat;
use crate::error::Denied;
use crate::session_file::SessionFile;

/// Everything a command needs.
pub struct Context {
    pub client: ApiClient,
    pub session: Session,
    pub session_file: SessionFile,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(client: ApiClient, session_file: SessionFile, format: OutputFormat) -> Self {
        Self {
            client,
            session: Session::new(),
            session_file,
            format,
        }
    }

    /// The signed-in principal, probing the service on first use.
    pub async fn principal(&self) -> Option<Principal> {
        self.session.resolve_principal(&self.client).await
    }

    /// Fail with a denial unless `decision` allows the command.
    pub fn ensure(&self, decision: AccessDecision) -> Result<()> {
        Denied::check(decision)?;
        Ok(())
    }

    /// Require any signed-in user.
    pub async fn require_session(&self) -> Result<Principal> {
        self.ensure(self.session.require_session(&self.client).await)?;
        self.principal().await.ok_or_else(|| Denied::Redirect(board_rbac::Route::Login).into())
    }

    /// Require an admin.
    pub async fn require_admin(&self) -> Result<Principal> {
        self.ensure(self.session.require_admin(&self.client).await)?;
        self.principal().await.ok_or_else(|| Denied::Redirect(board_rbac::Route::Login).into())
    }

    /// Fetch a post and check `operation` on it.
    ///
    /// Owner-only operations never depend on grants, so the check is exact
    /// without fetching them. Viewing may rest on a grant the caller cannot
    /// list, so it is left to the service.
    pub async fn authorized_post(&self, post_id: i64, operation: Operation) -> Result<Post> {
        let principal = self.require_session().await?;
        let post = self.client.get_post(post_id).await?;

        if operation.is_owner_only() {
            let grants: [board_rbac::PermissionGrant; 0] = [];
            self.ensure(board_rbac::decide(Some(principal), &post, &grants[..], operation))?;
        }
        Ok(post)
    }
}
