//! Board API client.
//!
//! HTTP client for the video board service. Every request carries the
//! session cookie from the client's cookie jar; the jar is filled by
//! `POST /auth/login` or seeded from a configured session token.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// Name of the session cookie set by the service.
pub const SESSION_COOKIE: &str = "access_token";

/// Body of message-only responses (`logout`, deletes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Board service client.
///
/// Cheap to clone; clones share the connection pool and cookie jar.
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client instance.
    client: Client,

    /// Cookie jar holding the session cookie.
    jar: Arc<Jar>,

    /// Service configuration.
    config: ClientConfig,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("api_prefix", &self.config.api_prefix)
            .finish()
    }
}

impl ApiClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let jar = Arc::new(Jar::default());
        if let Some(ref token) = config.session_token {
            let origin = config.base()?;
            jar.add_cookie_str(&format!("{}={}; Path=/", SESSION_COOKIE, token), &origin);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .cookie_provider(jar.clone())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;

        Ok(Self {
            client,
            jar,
            config,
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    /// Current value of the session cookie, if one is held.
    pub fn session_token(&self) -> Option<String> {
        let origin = self.config.base().ok()?;
        let header = self.jar.cookies(&origin)?;
        let cookies = header.to_str().ok()?;

        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// `GET` a JSON resource.
    pub(crate) async fn get_json<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        debug!("GET {}", path);
        let response = self.request(Method::GET, path).send().await?;
        self.handle_response(response).await
    }

    /// Send a JSON body and parse a JSON response.
    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, path);
        let response = self.request(method, path).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Send a request with no body and parse a JSON response.
    pub(crate) async fn send_empty<T>(&self, method: Method, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        debug!("{} {}", method, path);
        let response = self.request(method, path).send().await?;
        self.handle_response(response).await
    }

    /// Turn a non-2xx response into an error, keeping the response otherwise.
    pub(crate) async fn check_status(&self, response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);
        warn!("Board API error ({}): {}", status.as_u16(), err);
        Err(err)
    }

    /// Handle API response and parse JSON.
    pub(crate) async fn handle_response<T>(&self, response: Response) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_config() {
        let result = ApiClient::new(ClientConfig::new("localhost:8000/no-scheme"));
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_seeded_session_token() {
        let config = ClientConfig::new("http://localhost:8000").with_session_token("abc123");
        let client = ApiClient::new(config).unwrap();
        assert_eq!(client.session_token().as_deref(), Some("abc123"));

        let client = ApiClient::new(ClientConfig::default()).unwrap();
        assert!(client.session_token().is_none());
    }

    #[test]
    fn test_url() {
        let client = ApiClient::new(ClientConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(client.url("/posts/4"), "http://localhost:8000/api/posts/4");
    }
}
