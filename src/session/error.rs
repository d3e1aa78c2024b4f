//! Error types for session storage operations.

use thiserror::Error;

/// Errors that can occur while persisting or loading the session token.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Underlying storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem error while reading or writing the token file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_display() {
        let err = SessionError::Storage("backend unavailable".to_string());
        assert_eq!(err.to_string(), "Storage error: backend unavailable");
    }

    #[test]
    fn io_error_display() {
        let err = SessionError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.to_string(), "I/O error: denied");
    }
}
