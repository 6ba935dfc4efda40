//! # Board Client
//!
//! This crate provides the HTTP client for the video board service.
//!
//! ## Overview
//!
//! The board-client crate handles:
//! - **Auth**: Sign-in, registration, sign-out, and the identity probe
//! - **Posts**: Listing, viewing, editing, deleting, and multipart upload
//! - **Grants**: Per-post permission management
//! - **Admin**: Stats, user management, and the full post list
//! - **Streaming**: Stream URLs and ranged video reads
//!
//! All routes live under `{base_url}{api_prefix}` and are sent with the
//! session cookie. There are no retries.
//!
//! ## Errors
//!
//! A non-2xx response becomes [`ApiError::Status`] whose message is the
//! response body, or `HTTP {status}` when the body is empty.
//! [`ApiError::disposition`] decides between a redirect (401, 403) and an
//! inline message.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use board_auth::Session;
//! use board_client::{ApiClient, ClientConfig};
//! use board_rbac::{decide, Operation};
//!
//! # async fn run() -> Result<(), board_client::ApiError> {
//! let client = ApiClient::new(ClientConfig::new("http://localhost:8000"))?;
//! let session = Session::new();
//!
//! let principal = session.resolve_principal(&client).await;
//! let post = client.get_post(9).await?;
//! let grants = Vec::new();
//!
//! let decision = decide(principal, &post, &grants, Operation::Edit);
//! if let Some(route) = decision.redirect_route() {
//!     println!("redirect to {}", route);
//! }
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod permissions;
pub mod posts;
pub mod progress;
pub mod stream;

// Re-export main types for convenience
pub use api::{ApiClient, MessageResponse, SESSION_COOKIE};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ApiResult, Disposition};
pub use stream::{ByteRange, VideoStream};
