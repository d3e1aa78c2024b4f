//! Client-side field validation.
//!
//! These checks run before any network call; the backend revalidates
//! everything it cares about. Messages are the exact copy the forms show
//! inline.

use thiserror::Error;

/// Maximum post length in characters.
pub const POST_MAX_CHARS: usize = 280;
/// Maximum comment length in characters.
pub const COMMENT_MAX_CHARS: usize = 500;
/// Minimum password length.
pub const PASSWORD_MIN_CHARS: usize = 8;

/// A field value the user must fix before submitting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name field left empty.
    #[error("Name is required")]
    NameRequired,

    /// Email field fails the shape check.
    #[error("Enter a valid email like name@example.com")]
    EmailInvalid,

    /// Password shorter than the minimum.
    #[error("Password must be at least {PASSWORD_MIN_CHARS} characters")]
    PasswordTooShort,

    /// Post body empty or whitespace.
    #[error("Write something to share")]
    PostEmpty,

    /// Post body over the character limit.
    #[error("Posts are limited to {POST_MAX_CHARS} characters")]
    PostTooLong,

    /// Comment body empty or whitespace.
    #[error("Write a comment first")]
    CommentEmpty,

    /// Comment body over the character limit.
    #[error("Comments are limited to {COMMENT_MAX_CHARS} characters")]
    CommentTooLong,

    /// Invite email field left empty.
    #[error("Please enter an email address")]
    InviteEmailRequired,
}

/// Result type alias for validation checks.
pub type Result = std::result::Result<(), ValidationError>;

/// Checks the registration name field.
///
/// # Errors
///
/// Returns an error when the name is empty or whitespace.
pub fn name(value: &str) -> Result {
    if value.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

/// Checks the email field shape: it must contain `@` and `.`.
///
/// # Errors
///
/// Returns an error when the shape check fails.
pub fn email(value: &str) -> Result {
    if !value.contains('@') || !value.contains('.') {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

/// Checks the password length.
///
/// # Errors
///
/// Returns an error when the password is too short.
pub fn password(value: &str) -> Result {
    if value.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Checks post content: non-blank and within the character limit.
///
/// # Errors
///
/// Returns an error when the content is blank or too long.
pub fn post_content(value: &str) -> Result {
    if value.trim().is_empty() {
        return Err(ValidationError::PostEmpty);
    }
    if value.chars().count() > POST_MAX_CHARS {
        return Err(ValidationError::PostTooLong);
    }
    Ok(())
}

/// Checks comment content: non-blank and within the character limit.
///
/// # Errors
///
/// Returns an error when the content is blank or too long.
pub fn comment_content(value: &str) -> Result {
    if value.trim().is_empty() {
        return Err(ValidationError::CommentEmpty);
    }
    if value.chars().count() > COMMENT_MAX_CHARS {
        return Err(ValidationError::CommentTooLong);
    }
    Ok(())
}

/// Checks the invite email field: non-blank.
///
/// # Errors
///
/// Returns an error when the field is empty or whitespace.
pub fn invite_email(value: &str) -> Result {
    if value.trim().is_empty() {
        return Err(ValidationError::InviteEmailRequired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rejects_blank() {
        assert_eq!(name(""), Err(ValidationError::NameRequired));
        assert_eq!(name("   "), Err(ValidationError::NameRequired));
        assert_eq!(name("Alice"), Ok(()));
    }

    #[test]
    fn email_shape_check() {
        assert_eq!(email("name@example.com"), Ok(()));
        assert_eq!(email("no-at-sign.com"), Err(ValidationError::EmailInvalid));
        assert_eq!(email("no-dot@example"), Err(ValidationError::EmailInvalid));
        assert_eq!(email(""), Err(ValidationError::EmailInvalid));
    }

    #[test]
    fn password_minimum_length() {
        assert_eq!(password("short"), Err(ValidationError::PasswordTooShort));
        assert_eq!(password("1234567"), Err(ValidationError::PasswordTooShort));
        assert_eq!(password("12345678"), Ok(()));
    }

    #[test]
    fn password_counts_characters_not_bytes() {
        // 8 multi-byte characters pass even though they are more bytes.
        assert_eq!(password("ääääääää"), Ok(()));
    }

    #[test]
    fn post_content_limits() {
        assert_eq!(post_content("hello world"), Ok(()));
        assert_eq!(post_content("  "), Err(ValidationError::PostEmpty));
        assert_eq!(post_content(&"x".repeat(POST_MAX_CHARS)), Ok(()));
        assert_eq!(
            post_content(&"x".repeat(POST_MAX_CHARS + 1)),
            Err(ValidationError::PostTooLong)
        );
    }

    #[test]
    fn comment_content_limits() {
        assert_eq!(comment_content("nice"), Ok(()));
        assert_eq!(comment_content(""), Err(ValidationError::CommentEmpty));
        assert_eq!(comment_content(&"y".repeat(COMMENT_MAX_CHARS)), Ok(()));
        assert_eq!(
            comment_content(&"y".repeat(COMMENT_MAX_CHARS + 1)),
            Err(ValidationError::CommentTooLong)
        );
    }

    #[test]
    fn invite_email_requires_value() {
        assert_eq!(invite_email("a@b.c"), Ok(()));
        assert_eq!(
            invite_email("  "),
            Err(ValidationError::InviteEmailRequired)
        );
    }

    #[test]
    fn messages_match_form_copy() {
        assert_eq!(
            ValidationError::EmailInvalid.to_string(),
            "Enter a valid email like name@example.com"
        );
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 8 characters"
        );
        assert_eq!(
            ValidationError::PostTooLong.to_string(),
            "Posts are limited to 280 characters"
        );
    }
}
