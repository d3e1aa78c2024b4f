//! Comment panel state controller.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::api::types::{Comment, CommentId, PostId};
use crate::api::{self, CircleApi};
use crate::validate;

#[derive(Debug, Default)]
struct PanelState {
    visible: bool,
    post_id: Option<PostId>,
    comments: Vec<Comment>,
    loading: bool,
    error: Option<String>,
}

/// Controller for the comment panel of a selected post.
///
/// Fetching is gated on the panel being visible and a post being selected;
/// while hidden, loads are no-ops. Creation appends the server-returned
/// comment to the end of the list, deletion filters the id out locally.
pub struct CommentPanel {
    api: Arc<dyn CircleApi>,
    state: Arc<RwLock<PanelState>>,
}

impl CommentPanel {
    /// Creates a hidden panel with no post selected.
    #[must_use]
    pub fn new(api: Arc<dyn CircleApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(PanelState::default())),
        }
    }

    /// Returns the current comment list.
    pub async fn comments(&self) -> Vec<Comment> {
        self.state.read().await.comments.clone()
    }

    /// Returns whether a fetch is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Returns the last inline error, if any.
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Shows or hides the panel, loading when it becomes visible.
    pub async fn set_visible(&self, visible: bool) {
        let became_visible = {
            let mut state = self.state.write().await;
            let became_visible = visible && !state.visible;
            state.visible = visible;
            became_visible
        };
        if became_visible {
            self.load().await;
        }
    }

    /// Selects the post whose comments are shown and reloads if visible.
    ///
    /// Selecting `None` clears the list.
    pub async fn select_post(&self, post_id: Option<PostId>) {
        {
            let mut state = self.state.write().await;
            state.post_id = post_id;
            if post_id.is_none() {
                state.comments.clear();
                state.error = None;
            }
        }
        self.load().await;
    }

    /// Fetches comments for the selected post.
    ///
    /// A no-op unless the panel is visible and a post is selected.
    pub async fn load(&self) {
        let post_id = {
            let mut state = self.state.write().await;
            if !state.visible {
                return;
            }
            let Some(post_id) = state.post_id else {
                return;
            };
            state.loading = true;
            post_id
        };

        debug!(post_id, "loading comments");
        let result = self.api.list_comments(post_id).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(comments) => {
                state.comments = comments;
                state.error = None;
            }
            Err(e) => {
                warn!(error = %e, "comment load failed");
                state.error = Some("Failed to load comments".to_string());
            }
        }
    }

    /// Creates a comment on the selected post and appends the stored
    /// entity to the end of the local list.
    ///
    /// # Errors
    ///
    /// Returns an error if no post is selected, the content fails local
    /// validation, or the API call fails. Local state is untouched on
    /// failure.
    pub async fn add_comment(&self, content: &str) -> api::Result<Comment> {
        let post_id = self
            .state
            .read()
            .await
            .post_id
            .ok_or_else(|| api::ApiError::Request("no post selected".to_string()))?;

        validate::comment_content(content)
            .map_err(|e| api::ApiError::Request(e.to_string()))?;

        let comment = self.api.create_comment(post_id, content).await?;

        let mut state = self.state.write().await;
        state.comments.push(comment.clone());
        Ok(comment)
    }

    /// Deletes a comment and filters it out of the local list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails; the list keeps the comment
    /// in that case.
    pub async fn delete_comment(&self, id: CommentId) -> api::Result<()> {
        self.api.delete_comment(id).await?;

        let mut state = self.state.write().await;
        state.comments.retain(|c| c.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::InMemoryBackend;
    use crate::session::Session;

    async fn panel_with_post() -> (CommentPanel, PostId) {
        let session = Session::in_memory();
        let backend = Arc::new(InMemoryBackend::new(session.clone()));
        backend
            .register("Alice", "alice@example.com", "password1")
            .await
            .unwrap();
        let pair = backend
            .login("alice@example.com", "password1")
            .await
            .unwrap();
        session.set_token(&pair.access_token).unwrap();
        let post = backend.create_post("a day out", None).await.unwrap();
        (CommentPanel::new(backend), post.post_id)
    }

    #[tokio::test]
    async fn hidden_panel_load_is_noop() {
        let (panel, post_id) = panel_with_post().await;
        panel.select_post(Some(post_id)).await;

        // Never shown, so nothing loads.
        assert!(panel.comments().await.is_empty());
        assert!(!panel.is_loading().await);
    }

    #[tokio::test]
    async fn becoming_visible_loads_comments() {
        let (panel, post_id) = panel_with_post().await;
        panel.select_post(Some(post_id)).await;
        panel.set_visible(true).await;

        panel.add_comment("lovely").await.unwrap();
        panel.set_visible(false).await;
        panel.set_visible(true).await;

        let comments = panel.comments().await;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, "lovely");
    }

    #[tokio::test]
    async fn add_comment_appends_to_end() {
        let (panel, post_id) = panel_with_post().await;
        panel.set_visible(true).await;
        panel.select_post(Some(post_id)).await;

        panel.add_comment("first").await.unwrap();
        panel.add_comment("second").await.unwrap();

        let contents: Vec<String> = panel
            .comments()
            .await
            .into_iter()
            .map(|c| c.content)
            .collect();
        assert_eq!(contents, ["first", "second"]);
    }

    #[tokio::test]
    async fn delete_comment_filters_locally() {
        let (panel, post_id) = panel_with_post().await;
        panel.set_visible(true).await;
        panel.select_post(Some(post_id)).await;

        let kept = panel.add_comment("keep me").await.unwrap();
        let gone = panel.add_comment("drop me").await.unwrap();

        panel.delete_comment(gone.id).await.unwrap();

        let comments = panel.comments().await;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, kept.id);
    }

    #[tokio::test]
    async fn add_comment_without_selection_fails() {
        let (panel, _post_id) = panel_with_post().await;
        assert!(panel.add_comment("orphan").await.is_err());
    }

    #[tokio::test]
    async fn blank_comment_is_rejected_locally() {
        let (panel, post_id) = panel_with_post().await;
        panel.set_visible(true).await;
        panel.select_post(Some(post_id)).await;

        assert!(panel.add_comment("   ").await.is_err());
        assert!(panel.comments().await.is_empty());
    }
}
