//! Wire types for the CircleShare backend API.
//!
//! These are the shapes the backend serves; the client treats the server as
//! authoritative and never invents identifiers. Timestamps are RFC 3339 on
//! the wire and [`DateTime<Utc>`] in memory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a user account.
pub type UserId = u64;
/// Identifier of a circle.
pub type CircleId = u64;
/// Identifier of a post.
pub type PostId = u64;
/// Identifier of a comment.
pub type CommentId = u64;
/// Identifier of an invitation.
pub type InvitationId = u64;

/// A post as served by the feed endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post identifier.
    pub post_id: PostId,
    /// Circle the post belongs to.
    pub circle_id: CircleId,
    /// Author's user id.
    pub author_id: UserId,
    /// Author's display name, resolved server-side.
    pub author_name: String,
    /// Text content.
    pub content: String,
    /// Attached photo, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Number of likes.
    #[serde(default)]
    pub like_count: u32,
    /// Whether the viewer has liked this post.
    #[serde(default)]
    pub liked_by_me: bool,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier.
    pub id: CommentId,
    /// Parent post.
    pub post_id: PostId,
    /// Author's user id.
    pub author_id: UserId,
    /// Author's display name.
    pub author_name: String,
    /// Text content.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A member of the viewer's circle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircleMember {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// A received circle invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Invitation identifier.
    pub id: InvitationId,
    /// Sender's display name.
    pub from_user_name: String,
    /// Sender's email address.
    pub from_user_email: String,
    /// Invitation status as reported by the server.
    pub status: String,
    /// When the invitation was sent.
    pub created_at: DateTime<Utc>,
}

/// The token pair returned by a successful login.
///
/// The caller must persist `access_token` explicitly; login does not touch
/// the session store by itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Opaque bearer token.
    pub access_token: String,
    /// Token scheme; always `"bearer"`.
    pub token_type: String,
}

/// The viewer's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// User id.
    pub user_id: UserId,
    /// Email address.
    pub email: String,
    /// Account creation time.
    pub member_since: DateTime<Utc>,
}

/// New like state returned by the like-toggle endpoint.
///
/// The caller adjusts the displayed count by one in the matching direction
/// rather than refetching the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeState {
    /// Whether the viewer now likes the post.
    pub liked: bool,
}

/// Response to an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationAction {
    /// Join the sender's circle.
    Accept,
    /// Turn the invitation down.
    Decline,
}

impl InvitationAction {
    /// Converts to the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Decline => "decline",
        }
    }

    /// Parses from the wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "accept" => Some(Self::Accept),
            "decline" => Some(Self::Decline),
            _ => None,
        }
    }
}

/// A photo attached to a new post.
///
/// Presence of a photo switches post creation to multipart encoding.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Creates a photo upload.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}
