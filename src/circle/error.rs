//! Error types for circle membership operations.

use thiserror::Error;

use crate::api::{ApiError, ErrorCode};

/// Outcome of a failed invitation, carrying the user-facing copy.
///
/// Selected from the typed [`ErrorCode`] of the backend rejection, never
/// from message text.
#[derive(Debug, Error)]
pub enum InviteError {
    /// The invitee has no account.
    #[error("{email} isn't on CircleShare yet. They'll need to sign up first!")]
    UserNotFound {
        /// The email that was invited.
        email: String,
    },

    /// The invitee is already in the circle.
    #[error("{email} is already in your circle")]
    AlreadyInCircle {
        /// The email that was invited.
        email: String,
    },

    /// An invitation to this user is already pending.
    #[error("You've already invited {email}")]
    AlreadyInvited {
        /// The email that was invited.
        email: String,
    },

    /// The viewer is not logged in (or the token was rejected).
    #[error("You need to log in again")]
    Unauthenticated,

    /// Anything else; shows the backend's message as-is.
    #[error("{0}")]
    Other(String),
}

impl InviteError {
    /// Maps an API failure to invitation copy for the given email.
    #[must_use]
    pub fn from_api(error: &ApiError, email: &str) -> Self {
        if error.is_auth_failure() {
            return Self::Unauthenticated;
        }
        match error.code() {
            Some(ErrorCode::NotFound) => Self::UserNotFound {
                email: email.to_string(),
            },
            Some(ErrorCode::AlreadyMember) => Self::AlreadyInCircle {
                email: email.to_string(),
            },
            Some(ErrorCode::AlreadyInvited) => Self::AlreadyInvited {
                email: email.to_string(),
            },
            _ => Self::Other(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(code: ErrorCode, message: &str) -> ApiError {
        ApiError::Backend {
            code,
            message: message.to_string(),
        }
    }

    #[test]
    fn user_not_found_copy() {
        let err = InviteError::from_api(
            &backend(ErrorCode::NotFound, "User not found"),
            "ghost@nowhere.com",
        );
        assert_eq!(
            err.to_string(),
            "ghost@nowhere.com isn't on CircleShare yet. They'll need to sign up first!"
        );
    }

    #[test]
    fn already_member_copy() {
        let err = InviteError::from_api(
            &backend(ErrorCode::AlreadyMember, "User already joined"),
            "friend@example.com",
        );
        assert_eq!(
            err.to_string(),
            "friend@example.com is already in your circle"
        );
    }

    #[test]
    fn already_invited_copy() {
        let err = InviteError::from_api(
            &backend(ErrorCode::AlreadyInvited, "Invite already sent"),
            "friend@example.com",
        );
        assert_eq!(err.to_string(), "You've already invited friend@example.com");
    }

    #[test]
    fn missing_token_maps_to_unauthenticated() {
        let err = InviteError::from_api(&ApiError::Unauthenticated, "x@y.z");
        assert_eq!(err.to_string(), "You need to log in again");
    }

    #[test]
    fn rejected_token_maps_to_unauthenticated() {
        let err = InviteError::from_api(
            &backend(ErrorCode::Unauthorized, "Token expired"),
            "x@y.z",
        );
        assert_eq!(err.to_string(), "You need to log in again");
    }

    #[test]
    fn unclassified_shows_backend_message() {
        let err = InviteError::from_api(&backend(ErrorCode::Unknown, "quota exceeded"), "x@y.z");
        assert_eq!(err.to_string(), "quota exceeded");
    }
}
