//! # Board Auth (Session Accessor)
//!
//! This crate tracks who is signed in to the video board.
//!
//! ## Overview
//!
//! The board-auth crate handles:
//! - **Sessions**: A lazily resolved, cached current-user value
//! - **Identity providers**: The seam a session probes, signs in and signs out through
//! - **Guards**: Session-aware wrappers over the board-rbac policy
//!
//! ## Usage
//!
//! ```rust,no_run
//! use board_auth::{IdentityProvider, Session};
//! use board_model::LoginRequest;
//!
//! async fn sign_in<P: IdentityProvider>(provider: &P) {
//!     let session = Session::new();
//!
//!     // First call probes the provider; later calls reuse the result
//!     if session.resolve(provider).await.is_none() {
//!         let request = LoginRequest::new("user@example.com", "secret");
//!         let user = session.login(provider, &request).await.unwrap();
//!         println!("signed in as {}", user.display_name());
//!     }
//! }
//! ```
//!
//! The session cookie itself lives in the HTTP client. Nothing here reads
//! or stores credentials.

pub mod error;
pub mod session;

// Re-export main types for convenience
pub use error::{AuthError, AuthResult};
pub use session::{IdentityProvider, Session, SessionState};
