//! User validation and normalization utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("name cannot be empty")]
    InvalidName,

    #[error("email format is invalid")]
    InvalidEmail,

    #[error("username must be at least 3 characters")]
    InvalidUsername,
}

pub const MIN_USERNAME_LENGTH: usize = 3;

/// local-part@dotted.domain with a 2+ letter top-level segment
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Validate a display name
///
/// Rules:
/// - Cannot be empty or whitespace-only
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::InvalidName);
    }

    Ok(())
}

/// Validate an email address
///
/// Rules:
/// - Cannot be empty after trimming
/// - Must look like `local@domain.tld`, the local part limited to
///   alphanumerics and `._%+-`, the TLD at least two letters
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    let email = email.trim();

    if email.is_empty() || !EMAIL_PATTERN.is_match(email) {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate a username
///
/// Rules:
/// - Minimum 3 characters after trimming
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.trim().chars().count() < MIN_USERNAME_LENGTH {
        return Err(UserValidationError::InvalidUsername);
    }

    Ok(())
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}

/// Trim and lowercase; shared by emails and usernames
pub fn normalize_identifier(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Name tests
    #[test]
    fn test_valid_names() {
        assert!(validate_name("Alice").is_ok());
        assert!(validate_name("  Bob  ").is_ok());
        assert!(validate_name("x").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_name(""), Err(UserValidationError::InvalidName));
        assert_eq!(validate_name("   \t"), Err(UserValidationError::InvalidName));
    }

    // Email tests
    #[test]
    fn test_valid_emails() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("first.last+tag@mail.example.org").is_ok());
        assert!(validate_email("  Alice@Example.COM  ").is_ok());
        assert!(validate_email("user_%-1@sub-domain.io").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(
            validate_email("not-an-email"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(validate_email(""), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("   "), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("a@b.c"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("a@b"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("@b.com"), Err(UserValidationError::InvalidEmail));
        assert_eq!(
            validate_email("a b@c.com"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(validate_email("a@b.c0m"), Err(UserValidationError::InvalidEmail));
    }

    // Username tests
    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("  alice  ").is_ok());
        assert!(validate_username("User_123").is_ok());
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            validate_username("ab"),
            Err(UserValidationError::InvalidUsername)
        );
        assert_eq!(
            validate_username("  ab  "),
            Err(UserValidationError::InvalidUsername)
        );
        assert_eq!(validate_username(""), Err(UserValidationError::InvalidUsername));
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_name("  Alice Smith "), "Alice Smith");
        assert_eq!(normalize_identifier("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_identifier("ALICE"), "alice");
    }
}
