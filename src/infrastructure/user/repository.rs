//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::user::{normalize_identifier, User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
///
/// A single reader/writer lock guards the whole map: reads share it,
/// `save`/`update`/`delete` hold it exclusively. `save` does not check
/// email or username uniqueness, so two concurrent creates that both pass
/// the service's existence checks will both be stored.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect();

        Self {
            users: RwLock::new(users),
        }
    }

    async fn find_by<F>(&self, predicate: F) -> Option<User>
    where
        F: Fn(&User) -> bool,
    {
        let users = self.users.read().await;
        users.values().find(|u| predicate(u)).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<User, DomainError> {
        let users = self.users.read().await;
        users
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        let email = normalize_identifier(email);
        self.find_by(|u| u.email() == email)
            .await
            .ok_or_else(|| DomainError::not_found(format!("User with email '{}' not found", email)))
    }

    async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        let username = normalize_identifier(username);
        self.find_by(|u| u.username() == username).await.ok_or_else(|| {
            DomainError::not_found(format!("User with username '{}' not found", username))
        })
    }

    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            ))),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        if users.remove(id).is_some() {
            Ok(())
        } else {
            Err(DomainError::not_found(format!("User '{}' not found", id)))
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let email = normalize_identifier(email);
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email() == email))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let username = normalize_identifier(username);
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.username() == username))
    }
}
