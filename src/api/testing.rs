//! In-memory stand-in for the CircleShare backend.
//!
//! [`InMemoryBackend`] implements [`CircleApi`] over plain data structures
//! with the same business rules and error vocabulary as the real service,
//! so controllers and flows can be exercised without a network. It resolves
//! the caller through an injected [`Session`], which keeps the
//! token-required contract identical to the HTTP client: no stored token
//! means the call is refused up front.
//!
//! This implementation is for tests only.

// State mutations need the lock for the whole operation.
#![allow(clippy::significant_drop_tightening)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::{ApiError, ErrorCode, Result};
use super::traits::CircleApi;
use super::types::{
    CircleMember, Comment, CommentId, Invitation, InvitationAction, InvitationId, LikeState,
    PhotoUpload, Post, PostId, Profile, TokenPair, UserId,
};
use crate::session::Session;

/// Seconds added to the fake clock per created entity.
const CLOCK_STEP: i64 = 60;

#[derive(Debug, Clone)]
struct UserRecord {
    id: UserId,
    name: String,
    email: String,
    password: String,
    first_access: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct PostRecord {
    post_id: PostId,
    circle_owner: UserId,
    author_id: UserId,
    author_name: String,
    content: String,
    photo_url: Option<String>,
    created_at: DateTime<Utc>,
    likes: HashSet<UserId>,
}

impl PostRecord {
    fn to_wire(&self, viewer: UserId) -> Post {
        Post {
            post_id: self.post_id,
            circle_id: self.circle_owner,
            author_id: self.author_id,
            author_name: self.author_name.clone(),
            content: self.content.clone(),
            photo_url: self.photo_url.clone(),
            created_at: self.created_at,
            like_count: u32::try_from(self.likes.len()).unwrap_or(u32::MAX),
            liked_by_me: self.likes.contains(&viewer),
        }
    }
}

#[derive(Debug, Clone)]
struct CommentRecord {
    id: CommentId,
    post_id: PostId,
    author_id: UserId,
    author_name: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl CommentRecord {
    fn to_wire(&self) -> Comment {
        Comment {
            id: self.id,
            post_id: self.post_id,
            author_id: self.author_id,
            author_name: self.author_name.clone(),
            content: self.content.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
struct InviteRecord {
    id: InvitationId,
    from_user: UserId,
    to_user: UserId,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct BackendState {
    users: Vec<UserRecord>,
    tokens: HashMap<String, UserId>,
    /// Circle roster per owner, owner included.
    circles: HashMap<UserId, HashSet<UserId>>,
    posts: Vec<PostRecord>,
    comments: Vec<CommentRecord>,
    invitations: Vec<InviteRecord>,
    next_id: u64,
    clock: i64,
}

impl BackendState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += CLOCK_STEP;
        DateTime::from_timestamp(self.clock, 0).unwrap_or_default()
    }

    fn user_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.email == email)
    }

    fn user_by_id(&self, id: UserId) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Backend {
        code: ErrorCode::NotFound,
        message: format!("{what} not found"),
    }
}

/// In-memory [`CircleApi`] implementation with backend semantics.
pub struct InMemoryBackend {
    session: Session,
    state: Mutex<BackendState>,
}

impl InMemoryBackend {
    /// Creates a backend that resolves callers through the given session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            state: Mutex::new(BackendState {
                clock: 1_700_000_000,
                ..BackendState::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Resolves the calling user from the stored token.
    fn caller(&self, state: &BackendState) -> Result<UserId> {
        let token = self.session.token()?.ok_or(ApiError::Unauthenticated)?;
        state
            .tokens
            .get(token.as_str())
            .copied()
            .ok_or(ApiError::Backend {
                code: ErrorCode::Unauthorized,
                message: "Invalid token".to_string(),
            })
    }

    /// Seeds a post by the given registered author at an explicit time.
    ///
    /// # Panics
    ///
    /// Panics if no user with that email exists.
    pub fn seed_post(&self, author_email: &str, content: &str, created_at_secs: i64) -> PostId {
        let mut state = self.lock();
        let author = state
            .user_by_email(author_email)
            .expect("seed_post: unknown author")
            .clone();
        let post_id = state.next_id();
        state.posts.push(PostRecord {
            post_id,
            circle_owner: author.id,
            author_id: author.id,
            author_name: author.name,
            content: content.to_string(),
            photo_url: None,
            created_at: DateTime::from_timestamp(created_at_secs, 0).unwrap_or_default(),
            likes: HashSet::new(),
        });
        post_id
    }
}

#[async_trait]
impl CircleApi for InMemoryBackend {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<()> {
        let mut state = self.lock();
        if state.user_by_email(email).is_some() {
            return Err(ApiError::Backend {
                code: ErrorCode::AlreadyRegistered,
                message: "Email already registered".to_string(),
            });
        }

        let id = state.next_id();
        let first_access = state.tick();
        state.users.push(UserRecord {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            first_access,
        });
        state.circles.insert(id, HashSet::from([id]));
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let mut state = self.lock();
        let user = state
            .user_by_email(email)
            .cloned()
            .ok_or_else(|| not_found("User"))?;

        if user.password != password {
            return Err(ApiError::Backend {
                code: ErrorCode::InvalidCredentials,
                message: "Invalid password".to_string(),
            });
        }

        let seq = state.next_id();
        let token = format!("token-{}-{seq}", user.id);
        state.tokens.insert(token.clone(), user.id);
        Ok(TokenPair {
            access_token: token,
            token_type: "bearer".to_string(),
        })
    }

    async fn profile(&self) -> Result<Profile> {
        let state = self.lock();
        let caller = self.caller(&state)?;
        let user = state.user_by_id(caller).ok_or_else(|| not_found("User"))?;
        Ok(Profile {
            user_id: user.id,
            email: user.email.clone(),
            member_since: user.first_access,
        })
    }

    async fn list_feed(&self) -> Result<Vec<Post>> {
        let state = self.lock();
        let caller = self.caller(&state)?;
        Ok(state
            .posts
            .iter()
            .filter(|p| {
                p.author_id != caller
                    && state
                        .circles
                        .get(&p.circle_owner)
                        .is_some_and(|members| members.contains(&caller))
            })
            .map(|p| p.to_wire(caller))
            .collect())
    }

    async fn list_my_posts(&self) -> Result<Vec<Post>> {
        let state = self.lock();
        let caller = self.caller(&state)?;
        Ok(state
            .posts
            .iter()
            .filter(|p| p.author_id == caller)
            .map(|p| p.to_wire(caller))
            .collect())
    }

    async fn create_post(&self, content: &str, photo: Option<PhotoUpload>) -> Result<Post> {
        let mut state = self.lock();
        let caller = self.caller(&state)?;
        let author = state
            .user_by_id(caller)
            .cloned()
            .ok_or_else(|| not_found("User"))?;

        let post_id = state.next_id();
        let created_at = state.tick();
        let record = PostRecord {
            post_id,
            circle_owner: caller,
            author_id: caller,
            author_name: author.name,
            content: content.to_string(),
            photo_url: photo
                .map(|p| format!("https://photos.circleshare.test/{}", p.file_name)),
            created_at,
            likes: HashSet::new(),
        };
        let wire = record.to_wire(caller);
        state.posts.push(record);
        Ok(wire)
    }

    async fn delete_post(&self, post_id: PostId) -> Result<()> {
        let mut state = self.lock();
        let caller = self.caller(&state)?;
        let post = state
            .posts
            .iter()
            .find(|p| p.post_id == post_id)
            .cloned()
            .ok_or_else(|| not_found("Post"))?;

        let can_delete = post.author_id == caller || post.circle_owner == caller;
        if !can_delete {
            return Err(ApiError::Backend {
                code: ErrorCode::AccessDenied,
                message: "You don't have access to this operation".to_string(),
            });
        }

        state.posts.retain(|p| p.post_id != post_id);
        state.comments.retain(|c| c.post_id != post_id);
        Ok(())
    }

    async fn list_members(&self) -> Result<Vec<CircleMember>> {
        let state = self.lock();
        let caller = self.caller(&state)?;
        let members = state
            .circles
            .get(&caller)
            .ok_or_else(|| not_found("Circle"))?;

        Ok(state
            .users
            .iter()
            .filter(|u| u.id != caller && members.contains(&u.id))
            .map(|u| CircleMember {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
            })
            .collect())
    }

    async fn invite_member(&self, email: &str) -> Result<Invitation> {
        let mut state = self.lock();
        let caller = self.caller(&state)?;
        let sender = state
            .user_by_id(caller)
            .cloned()
            .ok_or_else(|| not_found("User"))?;
        let invitee = state
            .user_by_email(email)
            .cloned()
            .ok_or_else(|| not_found("User"))?;

        let already_member = state
            .circles
            .get(&caller)
            .is_some_and(|members| members.contains(&invitee.id));
        if already_member {
            return Err(ApiError::Backend {
                code: ErrorCode::AlreadyMember,
                message: "User already joined".to_string(),
            });
        }

        let pending = state
            .invitations
            .iter()
            .any(|i| i.from_user == caller && i.to_user == invitee.id);
        if pending {
            return Err(ApiError::Backend {
                code: ErrorCode::AlreadyInvited,
                message: "Invite already sent".to_string(),
            });
        }

        let id = state.next_id();
        let created_at = state.tick();
        state.invitations.push(InviteRecord {
            id,
            from_user: caller,
            to_user: invitee.id,
            created_at,
        });

        Ok(Invitation {
            id,
            from_user_name: sender.name,
            from_user_email: sender.email,
            status: "pending".to_string(),
            created_at,
        })
    }

    async fn remove_member(&self, member_id: UserId) -> Result<()> {
        let mut state = self.lock();
        let caller = self.caller(&state)?;

        if member_id == caller {
            return Err(ApiError::Backend {
                code: ErrorCode::Unknown,
                message: "Cannot remove yourself".to_string(),
            });
        }
        if state.user_by_id(member_id).is_none() {
            return Err(not_found("User"));
        }

        let members = state
            .circles
            .get_mut(&caller)
            .ok_or_else(|| not_found("Circle"))?;
        if !members.remove(&member_id) {
            return Err(ApiError::Backend {
                code: ErrorCode::NotInCircle,
                message: "User is not a member of this circle".to_string(),
            });
        }
        Ok(())
    }

    async fn list_invitations(&self) -> Result<Vec<Invitation>> {
        let state = self.lock();
        let caller = self.caller(&state)?;
        Ok(state
            .invitations
            .iter()
            .filter(|i| i.to_user == caller)
            .map(|i| {
                let sender = state.user_by_id(i.from_user);
                Invitation {
                    id: i.id,
                    from_user_name: sender.map_or_else(String::new, |u| u.name.clone()),
                    from_user_email: sender.map_or_else(String::new, |u| u.email.clone()),
                    status: "pending".to_string(),
                    created_at: i.created_at,
                }
            })
            .collect())
    }

    async fn respond_invitation(&self, id: InvitationId, action: InvitationAction) -> Result<()> {
        let mut state = self.lock();
        let caller = self.caller(&state)?;
        let invite = state
            .invitations
            .iter()
            .find(|i| i.id == id && i.to_user == caller)
            .cloned()
            .ok_or_else(|| not_found("Invitation"))?;

        if action == InvitationAction::Accept {
            // Membership becomes mutual on accept.
            if let Some(members) = state.circles.get_mut(&invite.from_user) {
                members.insert(caller);
            }
            if let Some(members) = state.circles.get_mut(&caller) {
                members.insert(invite.from_user);
            }
        }

        state.invitations.retain(|i| i.id != id);
        Ok(())
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>> {
        let state = self.lock();
        self.caller(&state)?;
        Ok(state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(CommentRecord::to_wire)
            .collect())
    }

    async fn create_comment(&self, post_id: PostId, content: &str) -> Result<Comment> {
        let mut state = self.lock();
        let caller = self.caller(&state)?;
        let author = state
            .user_by_id(caller)
            .cloned()
            .ok_or_else(|| not_found("User"))?;
        if !state.posts.iter().any(|p| p.post_id == post_id) {
            return Err(not_found("Post"));
        }

        let id = state.next_id();
        let created_at = state.tick();
        let record = CommentRecord {
            id,
            post_id,
            author_id: caller,
            author_name: author.name,
            content: content.to_string(),
            created_at,
        };
        let wire = record.to_wire();
        state.comments.push(record);
        Ok(wire)
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        let mut state = self.lock();
        self.caller(&state)?;
        if !state.comments.iter().any(|c| c.id == id) {
            return Err(not_found("Comment"));
        }
        state.comments.retain(|c| c.id != id);
        Ok(())
    }

    async fn toggle_like(&self, post_id: PostId) -> Result<LikeState> {
        let mut state = self.lock();
        let caller = self.caller(&state)?;
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.post_id == post_id)
            .ok_or_else(|| not_found("Post"))?;

        let liked = if post.likes.contains(&caller) {
            post.likes.remove(&caller);
            false
        } else {
            post.likes.insert(caller);
            true
        };
        Ok(LikeState { liked })
    }
}
