//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Lookups by email or username normalize the key (trim + lowercase)
/// before comparing. Every returned `User` is an owned copy; mutating it
/// never touches stored state.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Persist a new user
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Get a user by ID, `NotFound` when absent
    async fn get_by_id(&self, id: &UserId) -> Result<User, DomainError>;

    /// Get a user by email, `NotFound` when absent
    async fn get_by_email(&self, email: &str) -> Result<User, DomainError>;

    /// Get a user by username, `NotFound` when absent
    async fn get_by_username(&self, username: &str) -> Result<User, DomainError>;

    /// List all users in no particular order
    async fn get_all(&self) -> Result<Vec<User>, DomainError>;

    /// Replace a stored user, `NotFound` when the ID is absent
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Delete a user, `NotFound` when the ID is absent
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;

    /// Check if any user has this email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Check if any user has this username
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;
}
