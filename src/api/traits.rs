//! The backend operation surface as a trait.
//!
//! Controllers depend on [`CircleApi`] rather than the concrete HTTP
//! client, so tests can drive them with an in-memory double the same way
//! the session layer substitutes its store.

use async_trait::async_trait;

use super::error::Result;
use super::types::{
    CircleMember, Comment, CommentId, Invitation, InvitationAction, InvitationId, LikeState,
    PhotoUpload, Post, PostId, Profile, TokenPair, UserId,
};

/// One async method per backend operation.
///
/// Implementations perform exactly one request per invocation; no retries,
/// deduplication, or caching. Every authenticated operation must fail with
/// [`ApiError::Unauthenticated`](super::ApiError::Unauthenticated) before
/// any network I/O when no token is stored.
#[async_trait]
pub trait CircleApi: Send + Sync {
    /// Creates an account. Unauthenticated.
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<()>;

    /// Exchanges credentials for a token pair. Unauthenticated; the caller
    /// persists the token explicitly.
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair>;

    /// Fetches the viewer's profile.
    async fn profile(&self) -> Result<Profile>;

    /// Lists posts from the viewer's circles authored by others, in server
    /// order.
    async fn list_feed(&self) -> Result<Vec<Post>>;

    /// Lists the viewer's own posts, in server order.
    async fn list_my_posts(&self) -> Result<Vec<Post>>;

    /// Creates a post; multipart when a photo is attached, JSON otherwise.
    async fn create_post(&self, content: &str, photo: Option<PhotoUpload>) -> Result<Post>;

    /// Deletes a post. The caller refreshes or removes locally.
    async fn delete_post(&self, post_id: PostId) -> Result<()>;

    /// Lists the viewer's circle members (excluding the viewer).
    async fn list_members(&self) -> Result<Vec<CircleMember>>;

    /// Invites a user to the viewer's circle by email.
    async fn invite_member(&self, email: &str) -> Result<Invitation>;

    /// Removes a member from the viewer's circle.
    async fn remove_member(&self, member_id: UserId) -> Result<()>;

    /// Lists pending invitations the viewer has received.
    async fn list_invitations(&self) -> Result<Vec<Invitation>>;

    /// Accepts or declines a received invitation.
    async fn respond_invitation(&self, id: InvitationId, action: InvitationAction) -> Result<()>;

    /// Lists comments on a post, in server order.
    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>>;

    /// Creates a comment and returns the stored entity.
    async fn create_comment(&self, post_id: PostId, content: &str) -> Result<Comment>;

    /// Deletes a comment by id.
    async fn delete_comment(&self, id: CommentId) -> Result<()>;

    /// Toggles the viewer's like on a post and returns the new flag. The
    /// caller adjusts the displayed count by one instead of refetching.
    async fn toggle_like(&self, post_id: PostId) -> Result<LikeState>;
}
