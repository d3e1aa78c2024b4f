//! Application composition root.
//!
//! [`CircleShare`] wires a session, an API client, and the refresh bus
//! together and carries the non-visual shell logic: login/registration
//! gating, logout, and the post-creation path that notifies the feed. The
//! UI layer holds one of these and builds controllers from it.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::api::types::{PhotoUpload, Post, Profile};
use crate::api::{ApiClient, ApiError, CircleApi};
use crate::circle::MembershipController;
use crate::comments::CommentPanel;
use crate::feed::{FeedController, FeedView, RefreshBus, RefreshEvent};
use crate::session::{FileTokenStore, Session, SessionError};
use crate::validate;

/// Errors surfaced by the shell-level flows.
#[derive(Debug, Error)]
pub enum AppError {
    /// A field failed the local checks; nothing was sent.
    #[error(transparent)]
    Validation(#[from] validate::ValidationError),

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session store failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result type alias for shell operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Configuration for [`CircleShare`].
#[derive(Debug, Clone)]
pub struct ShareConfig {
    /// Backend base URL, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
}

impl ShareConfig {
    /// Creates a configuration for the given backend.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Entry point composing the session, API client, and refresh bus.
pub struct CircleShare {
    api: Arc<dyn CircleApi>,
    session: Session,
    refresh: RefreshBus,
}

impl CircleShare {
    /// Creates an instance persisting the session under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ShareConfig, data_dir: &Path) -> Result<Self> {
        let session = Session::new(Arc::new(FileTokenStore::new(data_dir)));
        let api = Arc::new(ApiClient::new(config.base_url.clone(), session.clone())?);
        Ok(Self::from_parts(api, session))
    }

    /// Composes an instance from pre-built parts.
    ///
    /// This is the seam tests and embedders use to substitute the API or
    /// the session storage.
    #[must_use]
    pub fn from_parts(api: Arc<dyn CircleApi>, session: Session) -> Self {
        Self {
            api,
            session,
            refresh: RefreshBus::new(),
        }
    }

    /// Returns the session handle.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the refresh bus controllers subscribe to.
    #[must_use]
    pub fn refresh_bus(&self) -> &RefreshBus {
        &self.refresh
    }

    /// Whether a token is stored; decides the initial view on startup.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Registers an account after local field validation.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any network call, or the API
    /// error from the backend.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<()> {
        validate::name(name)?;
        validate::email(email)?;
        validate::password(password)?;

        self.api.register(name, email, password).await?;
        Ok(())
    }

    /// Logs in and persists the returned token for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any network call, the API error
    /// on rejected credentials, or a session error if persisting fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        validate::email(email)?;

        let pair = self.api.login(email, password).await?;
        self.session.set_token(&pair.access_token)?;
        debug!("logged in");
        Ok(())
    }

    /// Clears the stored token.
    ///
    /// # Errors
    ///
    /// Returns a session error if the store fails.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        debug!("logged out");
        Ok(())
    }

    /// Fetches the viewer's profile.
    ///
    /// # Errors
    ///
    /// Returns the API error when the call fails.
    pub async fn profile(&self) -> Result<Profile> {
        Ok(self.api.profile().await?)
    }

    /// Creates a post and notifies feed subscribers.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any network call, or the API
    /// error from the backend. No event is published on failure.
    pub async fn create_post(&self, content: &str, photo: Option<PhotoUpload>) -> Result<Post> {
        validate::post_content(content)?;

        let post = self.api.create_post(content, photo).await?;
        self.refresh.publish(RefreshEvent::PostsChanged);
        Ok(post)
    }

    /// Builds a feed controller for the given view.
    #[must_use]
    pub fn feed(&self, view: FeedView) -> FeedController {
        FeedController::new(Arc::clone(&self.api), view)
    }

    /// Builds a comment panel controller.
    #[must_use]
    pub fn comments(&self) -> CommentPanel {
        CommentPanel::new(Arc::clone(&self.api))
    }

    /// Builds a circle membership controller.
    #[must_use]
    pub fn membership(&self) -> MembershipController {
        MembershipController::new(Arc::clone(&self.api))
    }
}
