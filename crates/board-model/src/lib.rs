//! # Board Model
//!
//! This crate provides the data model for the video board client,
//! shared by the access policy, the session layer, and the API client.
//!
//! ## Overview
//!
//! The board-model crate handles:
//! - **Users**: Accounts, the `Principal` used for access decisions, and
//!   registration/login/admin-update payloads
//! - **Posts**: Video posts, partial updates, and upload payloads
//! - **Stats**: Admin dashboard totals
//! - **Validation**: Client-side checks matching the service's rules
//!
//! ## Architecture
//!
//! ```text
//! User ──principal()──→ Principal { id, is_admin }
//!   └─ authors ─→ Post { author_id, is_public, ... }
//!                   └─ VideoUpload (create) / PostUpdate (edit)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use board_model::{Principal, VideoUpload};
//!
//! let principal = Principal::member(5);
//! assert!(!principal.is_admin);
//!
//! let upload = VideoUpload::new("Weekly demo", "demo.mp4", vec![0u8; 1024])
//!     .with_description("Sprint 12")
//!     .with_visibility(false);
//! assert!(upload.validate().is_ok());
//! ```
//!
//! ## Integration
//!
//! This crate is designed to work with:
//! - `board-rbac`: Post access policy and permission grants
//! - `board-auth`: Session and identity resolution
//! - `board-client`: HTTP API client

pub mod error;
pub mod post;
pub mod stats;
pub mod timestamp;
pub mod user;

// Re-export main types for convenience
pub use error::{ValidationError, ValidationResult};
pub use post::{Post, PostUpdate, VideoFormat, VideoUpload};
pub use stats::AdminStats;
pub use user::{LoginRequest, Principal, RegisterRequest, Token, User, UserAdminUpdate};
