//! Session state: the authentication token and its persistence.
//!
//! CircleShare's only persisted client state is a single opaque bearer
//! token. Its presence implies "logged in" client-side; the client never
//! verifies it cryptographically. A stale or invalid token surfaces only
//! when a later API call fails with an authorization error, at which point
//! the shell forces logout.
//!
//! The token slot is injected explicitly: components receive a [`Session`]
//! handle rather than reaching into ambient global storage, so tests can
//! substitute a [`MemoryTokenStore`].
//!
//! # Types
//!
//! - [`TokenStore`]: persistence trait (one token slot)
//! - [`FileTokenStore`] / [`MemoryTokenStore`]: built-in implementations
//! - [`Session`]: cloneable handle used by the API client and shell
//! - [`SessionToken`]: in-memory token value, zeroized on drop

mod error;
mod store;

use std::sync::Arc;

use zeroize::{Zeroize, ZeroizeOnDrop};

pub use error::{Result, SessionError};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore, AUTH_TOKEN_KEY};

/// An authentication token held in memory.
///
/// The backing string is wiped when the value is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token string.
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// Returns the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionToken").field(&"<redacted>").finish()
    }
}

/// Cloneable handle over an injected [`TokenStore`].
///
/// All components that need the current token hold one of these; there is
/// no other path to the stored credential.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    /// Creates a session over the given store.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Creates a session backed by in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Returns the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn token(&self) -> Result<Option<SessionToken>> {
        Ok(self.store.load()?.map(SessionToken::new))
    }

    /// Persists a new token for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.save(token)
    }

    /// Removes the stored token; used on logout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }

    /// Returns whether a token is currently stored.
    ///
    /// Store failures count as "not logged in".
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self.store.load(), Ok(Some(_)))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}
