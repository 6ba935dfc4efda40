//! Authentication endpoints (`/auth/*`).

use async_trait::async_trait;
use board_auth::IdentityProvider;
use board_model::{LoginRequest, RegisterRequest, Token, User};
use reqwest::Method;
use tracing::{debug, instrument};

use crate::api::{ApiClient, MessageResponse};
use crate::error::{ApiError, ApiResult};

impl ApiClient {
    /// The user bound to the current session cookie.
    #[instrument(skip(self))]
    pub async fn me(&self) -> ApiResult<User> {
        self.get_json("/auth/me").await
    }

    /// Sign in. The service answers with the token and sets the cookie.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<Token> {
        debug!("Signing in {}", request.email);
        self.send_json(Method::POST, "/auth/login", request).await
    }

    /// Create an account. Does not sign in.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        request.validate()?;
        self.send_json(Method::POST, "/auth/register", request).await
    }

    /// End the session. The service clears the cookie.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ApiResult<MessageResponse> {
        self.send_empty(Method::POST, "/auth/logout").await
    }
}

#[async_trait]
impl IdentityProvider for ApiClient {
    type Error = ApiError;

    async fn current_user(&self) -> Result<User, ApiError> {
        self.me().await
    }

    async fn sign_in(&self, request: &LoginRequest) -> Result<Token, ApiError> {
        self.login(request).await
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        self.logout().await.map(|_| ())
    }
}
