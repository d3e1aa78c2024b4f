//! Persistent storage abstraction for the session token.
//!
//! This module defines the [`TokenStore`] trait for platform-agnostic
//! persistence of the single authentication token, plus the two built-in
//! implementations: [`FileTokenStore`] (a fixed-name file under a data
//! directory) and [`MemoryTokenStore`] (for tests and embedders that manage
//! persistence themselves).
//!
//! # Security
//!
//! The token is an opaque bearer credential. Stores receive it as a plain
//! string; the in-memory handle ([`super::Session`]) wraps loaded tokens in
//! a type that zeroizes on drop.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::error::{Result, SessionError};

/// Fixed storage name for the authentication token.
pub const AUTH_TOKEN_KEY: &str = "circleshare.auth.token";

/// Trait for persistence of the session token.
///
/// Implementations must be `Send + Sync` to allow use across threads.
/// There is exactly one token slot; saving overwrites any previous value.
pub trait TokenStore: Send + Sync {
    /// Persists the token, replacing any previously stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn save(&self, token: &str) -> Result<()>;

    /// Retrieves the stored token.
    ///
    /// # Returns
    ///
    /// `Ok(Some(token))` if one is stored, `Ok(None)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the retrieval operation fails.
    fn load(&self) -> Result<Option<String>>;

    /// Removes the stored token. Removing an absent token succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn clear(&self) -> Result<()>;
}

/// File-backed token store.
///
/// Persists the token to a fixed-name file under a data directory, the
/// desktop analogue of the browser's fixed local-storage key. The directory
/// is created on first save if needed.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store rooted at the given data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(AUTH_TOKEN_KEY),
        }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                SessionError::Storage(format!("Failed to create data directory: {e}"))
            })?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(token) if token.is_empty() => Ok(None),
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory token store.
///
/// Nothing survives the process; intended for tests and for embedders that
/// persist the token through their own platform storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        slots.insert(AUTH_TOKEN_KEY.to_string(), token.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        Ok(slots.get(AUTH_TOKEN_KEY).cloned())
    }

    fn clear(&self) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        slots.remove(AUTH_TOKEN_KEY);
        Ok(())
    }
}
