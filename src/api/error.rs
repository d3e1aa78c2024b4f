//! Error types for backend API operations.
//!
//! Every failure surfaces as an [`ApiError`] carrying a single
//! human-readable message. Business-rule failures additionally carry a
//! typed [`ErrorCode`]; callers switch on the code, never on message text.
//! Newer backends send the code in a structured `code` field; for older
//! snapshots that send only free-text `detail`/`message`, classification
//! happens once, here, and nowhere else.

use thiserror::Error;

/// Machine-readable category of a backend rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Wrong email or password at login.
    InvalidCredentials,
    /// The stored token was rejected (expired or invalid).
    Unauthorized,
    /// The caller may not perform this operation.
    AccessDenied,
    /// The referenced user, circle, post, or invitation does not exist.
    NotFound,
    /// The email is already registered.
    AlreadyRegistered,
    /// The invitee is already a circle member.
    AlreadyMember,
    /// A pending invitation to this user already exists.
    AlreadyInvited,
    /// The invitation was already accepted or declined.
    AlreadyResponded,
    /// The target user is not a member of the circle.
    NotInCircle,
    /// Anything the client cannot classify.
    Unknown,
}

impl ErrorCode {
    /// Converts to the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthorized => "unauthorized",
            Self::AccessDenied => "access_denied",
            Self::NotFound => "not_found",
            Self::AlreadyRegistered => "already_registered",
            Self::AlreadyMember => "already_member",
            Self::AlreadyInvited => "already_invited",
            Self::AlreadyResponded => "already_responded",
            Self::NotInCircle => "not_in_circle",
            Self::Unknown => "unknown",
        }
    }

    /// Parses the structured `code` field of an error body.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "invalid_credentials" => Some(Self::InvalidCredentials),
            "unauthorized" => Some(Self::Unauthorized),
            "access_denied" => Some(Self::AccessDenied),
            "not_found" => Some(Self::NotFound),
            "already_registered" => Some(Self::AlreadyRegistered),
            "already_member" => Some(Self::AlreadyMember),
            "already_invited" => Some(Self::AlreadyInvited),
            "already_responded" => Some(Self::AlreadyResponded),
            "not_in_circle" => Some(Self::NotInCircle),
            _ => None,
        }
    }

    /// Classifies the free-text `detail` of a backend without `code` fields.
    ///
    /// Older backend snapshots communicate business rules only as text
    /// ("User not found", "Invite already sent", ...). This is the single
    /// place that text is interpreted; callers only ever see the code.
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        let text = message.to_ascii_lowercase();
        if text.contains("not found") {
            Self::NotFound
        } else if text.contains("already registered") {
            Self::AlreadyRegistered
        } else if text.contains("already") && (text.contains("invit") || text.contains("sent")) {
            Self::AlreadyInvited
        } else if text.contains("already responded") {
            Self::AlreadyResponded
        } else if text.contains("already") {
            Self::AlreadyMember
        } else if text.contains("not a member") {
            Self::NotInCircle
        } else if text.contains("password") || text.contains("credential") {
            Self::InvalidCredentials
        } else if text.contains("token") {
            Self::Unauthorized
        } else if text.contains("access") || text.contains("permission") {
            Self::AccessDenied
        } else {
            Self::Unknown
        }
    }

    /// Fallback classification from the HTTP status when no body parses.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::AccessDenied,
            404 => Self::NotFound,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while calling the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No token is stored; the call was refused before any network I/O.
    #[error("No auth token found")]
    Unauthenticated,

    /// The request could not be built (bad photo MIME type, bad URL).
    #[error("Invalid request: {0}")]
    Request(String),

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend rejected the operation.
    #[error("{message}")]
    Backend {
        /// Typed rejection category.
        code: ErrorCode,
        /// Human-readable text for inline display.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The session store failed while looking up the token.
    #[error("Session error: {0}")]
    Session(#[from] crate::session::SessionError),
}

impl ApiError {
    /// Returns the backend rejection code, if this is a backend error.
    #[must_use]
    pub const fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Backend { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the stored token was rejected and the shell should force
    /// logout.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated
                | Self::Backend {
                    code: ErrorCode::Unauthorized,
                    ..
                }
        )
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_display() {
        let err = ApiError::Unauthenticated;
        assert_eq!(err.to_string(), "No auth token found");
    }

    #[test]
    fn transport_display() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn backend_display_is_message_only() {
        let err = ApiError::Backend {
            code: ErrorCode::NotFound,
            message: "User not found".to_string(),
        };
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn decode_display() {
        let err = ApiError::Decode("missing field".to_string());
        assert_eq!(err.to_string(), "Failed to parse response: missing field");
    }

    #[test]
    fn code_accessor() {
        let err = ApiError::Backend {
            code: ErrorCode::AlreadyMember,
            message: "User already joined".to_string(),
        };
        assert_eq!(err.code(), Some(ErrorCode::AlreadyMember));
        assert_eq!(ApiError::Unauthenticated.code(), None);
    }

    #[test]
    fn auth_failure_detection() {
        assert!(ApiError::Unauthenticated.is_auth_failure());
        assert!(ApiError::Backend {
            code: ErrorCode::Unauthorized,
            message: "Token expired".to_string(),
        }
        .is_auth_failure());
        assert!(!ApiError::Backend {
            code: ErrorCode::NotFound,
            message: "Post not found".to_string(),
        }
        .is_auth_failure());
    }

    #[test]
    fn error_code_round_trip() {
        for code in [
            ErrorCode::InvalidCredentials,
            ErrorCode::Unauthorized,
            ErrorCode::AccessDenied,
            ErrorCode::NotFound,
            ErrorCode::AlreadyRegistered,
            ErrorCode::AlreadyMember,
            ErrorCode::AlreadyInvited,
            ErrorCode::AlreadyResponded,
            ErrorCode::NotInCircle,
        ] {
            assert_eq!(ErrorCode::parse(code.as_str()), Some(code));
        }
        assert_eq!(ErrorCode::parse("unknown"), None);
        assert_eq!(ErrorCode::parse("garbage"), None);
    }

    #[test]
    fn from_message_classifies_backend_vocabulary() {
        assert_eq!(
            ErrorCode::from_message("User not found"),
            ErrorCode::NotFound
        );
        assert_eq!(
            ErrorCode::from_message("Circle not found"),
            ErrorCode::NotFound
        );
        assert_eq!(
            ErrorCode::from_message("Email already registered"),
            ErrorCode::AlreadyRegistered
        );
        assert_eq!(
            ErrorCode::from_message("Invite already sent"),
            ErrorCode::AlreadyInvited
        );
        assert_eq!(
            ErrorCode::from_message("User already joined"),
            ErrorCode::AlreadyMember
        );
        assert_eq!(
            ErrorCode::from_message("Invalid password"),
            ErrorCode::InvalidCredentials
        );
        assert_eq!(
            ErrorCode::from_message("Token expired"),
            ErrorCode::Unauthorized
        );
        assert_eq!(
            ErrorCode::from_message("You don't have access to this operation"),
            ErrorCode::AccessDenied
        );
        assert_eq!(
            ErrorCode::from_message("User is not a member of this circle"),
            ErrorCode::NotInCircle
        );
        assert_eq!(
            ErrorCode::from_message("something odd happened"),
            ErrorCode::Unknown
        );
    }

    #[test]
    fn from_status_fallback() {
        assert_eq!(ErrorCode::from_status(401), ErrorCode::Unauthorized);
        assert_eq!(ErrorCode::from_status(403), ErrorCode::AccessDenied);
        assert_eq!(ErrorCode::from_status(404), ErrorCode::NotFound);
        assert_eq!(ErrorCode::from_status(500), ErrorCode::Unknown);
    }
}
