//! Feed state controller.
//!
//! Owns the in-memory post list for the currently selected view and is the
//! only writer of that state. Fetches go through the injected [`CircleApi`];
//! results are sorted client-side by creation time, newest first.
//!
//! Overlapping fetches are resolved with a request generation: each load
//! takes the next generation number and a completion is applied only if no
//! newer load has started since. A late response is discarded, never
//! written over fresher data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::refresh::RefreshEvent;
use super::types::{FeedPhase, FeedView};
use crate::api::types::{LikeState, Post, PostId};
use crate::api::{self, CircleApi};

#[derive(Debug, Default)]
struct FeedState {
    view: FeedView,
    phase: FeedPhase,
    posts: Vec<Post>,
}

/// Controller for the post feed.
///
/// Cheap to clone via the shared interior state; all methods take `&self`.
pub struct FeedController {
    api: Arc<dyn CircleApi>,
    state: Arc<RwLock<FeedState>>,
    generation: AtomicU64,
}

impl FeedController {
    /// Creates a controller showing the given view. Nothing is fetched
    /// until [`load`](Self::load) is called.
    #[must_use]
    pub fn new(api: Arc<dyn CircleApi>, view: FeedView) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(FeedState {
                view,
                ..FeedState::default()
            })),
            generation: AtomicU64::new(0),
        }
    }

    /// Returns the currently selected view.
    pub async fn view(&self) -> FeedView {
        self.state.read().await.view
    }

    /// Returns the current loading phase.
    pub async fn phase(&self) -> FeedPhase {
        self.state.read().await.phase.clone()
    }

    /// Returns the current post list, newest first.
    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.posts.clone()
    }

    /// Switches the view, reloading when it actually changes.
    pub async fn set_view(&self, view: FeedView) {
        {
            let mut state = self.state.write().await;
            if state.view == view {
                return;
            }
            state.view = view;
        }
        self.load().await;
    }

    /// Fetches the posts for the current view.
    ///
    /// Failures surface through [`phase`](Self::phase); the previous post
    /// list is left exactly as it was before the attempt.
    pub async fn load(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let view = {
            let mut state = self.state.write().await;
            state.phase = FeedPhase::Loading;
            state.view
        };
        debug!(view = view.as_str(), generation, "loading feed");

        let result = match view {
            FeedView::Mine => self.api.list_my_posts().await,
            FeedView::Circle => self.api.list_feed().await,
        };

        let mut state = self.state.write().await;
        if generation != self.generation.load(Ordering::SeqCst) {
            debug!(generation, "discarding stale feed response");
            return;
        }

        match result {
            Ok(mut posts) => {
                posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                state.posts = posts;
                state.phase = FeedPhase::Ready;
            }
            Err(e) => {
                warn!(error = %e, "feed load failed");
                state.phase = FeedPhase::Errored(e.to_string());
            }
        }
    }

    /// Reloads the current view.
    pub async fn refresh(&self) {
        self.load().await;
    }

    /// Deletes a post, then refetches the whole view.
    ///
    /// Confirmation prompting belongs to the UI and happens before this is
    /// called.
    ///
    /// # Errors
    ///
    /// Returns the API error when the delete fails; local state is
    /// untouched in that case.
    pub async fn delete_post(&self, post_id: PostId) -> api::Result<()> {
        self.api.delete_post(post_id).await?;
        self.refresh().await;
        Ok(())
    }

    /// Toggles the viewer's like on a post.
    ///
    /// Applies the returned flag and adjusts the displayed count by one in
    /// the matching direction, without refetching.
    ///
    /// # Errors
    ///
    /// Returns the API error when the toggle fails.
    pub async fn toggle_like(&self, post_id: PostId) -> api::Result<LikeState> {
        let like = self.api.toggle_like(post_id).await?;

        let mut state = self.state.write().await;
        if let Some(post) = state.posts.iter_mut().find(|p| p.post_id == post_id) {
            if post.liked_by_me != like.liked {
                post.liked_by_me = like.liked;
                post.like_count = if like.liked {
                    post.like_count.saturating_add(1)
                } else {
                    post.like_count.saturating_sub(1)
                };
            }
        }
        Ok(like)
    }

    /// Reloads on every posts-changed event until the bus closes.
    ///
    /// Drive this from a spawned task; it replaces the imperative refresh
    /// handle a sibling form would otherwise hold.
    pub async fn service(&self, mut events: Receiver<RefreshEvent>) {
        loop {
            match events.recv().await {
                Ok(RefreshEvent::PostsChanged) => self.refresh().await,
                Ok(_) => {}
                // Missed events collapse into a single reload.
                Err(RecvError::Lagged(_)) => self.refresh().await,
                Err(RecvError::Closed) => break,
            }
        }
    }
}
