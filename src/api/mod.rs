//! REST client for the CircleShare backend.
//!
//! The backend is a black-box HTTP service; this module gives it a typed
//! surface. Each operation performs exactly one request, attaches the
//! bearer token from the injected session, and normalizes failure into an
//! [`ApiError`] carrying a typed [`ErrorCode`] plus one human-readable
//! string.
//!
//! # Architecture
//!
//! ```text
//! CircleApi (trait, one method per endpoint)
//!     ├── ApiClient (reqwest, production)
//!     └── InMemoryBackend (tests, feature = "test-utils")
//! ```
//!
//! # Types
//!
//! - [`CircleApi`]: the operation surface controllers depend on
//! - [`ApiClient`]: HTTP implementation
//! - [`ApiError`] / [`ErrorCode`]: normalized failure taxonomy
//! - wire entities: [`Post`], [`Comment`], [`CircleMember`], [`Invitation`]

mod client;
mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
mod traits;
pub mod types;

pub use client::ApiClient;
pub use error::{ApiError, ErrorCode, Result};
pub use traits::CircleApi;
pub use types::{
    CircleId, CircleMember, Comment, CommentId, Invitation, InvitationAction, InvitationId,
    LikeState, PhotoUpload, Post, PostId, Profile, TokenPair, UserId,
};
