use thiserror::Error;

use super::user::UserValidationError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] UserValidationError),

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Email '{email}' already exists")]
    EmailExists { email: String },

    #[error("Username '{username}' already exists")]
    UsernameExists { username: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn email_exists(email: impl Into<String>) -> Self {
        Self::EmailExists {
            email: email.into(),
        }
    }

    pub fn username_exists(username: impl Into<String>) -> Self {
        Self::UsernameExists {
            username: username.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
