//! User service for profile management

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::user::{normalize_identifier, User, UserId, UserRepository};
use crate::domain::DomainError;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub username: String,
}

/// Request for updating a user; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

/// User service orchestrating the aggregate and the repository
///
/// Uniqueness is checked before writing (check-then-act). The sequence is
/// not atomic: concurrent creates with the same email can both pass the
/// checks. The PostgreSQL backend rejects the second write through its
/// unique indexes; the in-memory backend stores both.
#[derive(Debug, Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a new user service
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        if self.repository.exists_by_email(&request.email).await? {
            warn!(email = %request.email, "Rejected create: email already exists");
            return Err(DomainError::email_exists(normalize_identifier(&request.email)));
        }

        if self.repository.exists_by_username(&request.username).await? {
            warn!(username = %request.username, "Rejected create: username already exists");
            return Err(DomainError::username_exists(normalize_identifier(
                &request.username,
            )));
        }

        let user = User::create(&request.name, &request.email, &request.username)?;

        self.repository.save(&user).await?;
        info!(user_id = %user.id(), "Created user");

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: &str) -> Result<User, DomainError> {
        self.repository.get_by_id(&UserId::from(id)).await
    }

    /// List all users; order is unspecified
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.get_all().await
    }

    /// Update the fields present in the request
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        let mut user = self.repository.get_by_id(&UserId::from(id)).await?;

        if let Some(name) = &request.name {
            user.update_name(name)?;
        }

        if let Some(email) = &request.email {
            // Keeping one's own email is not a conflict
            if normalize_identifier(email) != user.email()
                && self.repository.exists_by_email(email).await?
            {
                warn!(user_id = %user.id(), email = %email, "Rejected update: email already exists");
                return Err(DomainError::email_exists(normalize_identifier(email)));
            }
            user.update_email(email)?;
        }

        if let Some(username) = &request.username {
            if normalize_identifier(username) != user.username()
                && self.repository.exists_by_username(username).await?
            {
                warn!(user_id = %user.id(), username = %username, "Rejected update: username already exists");
                return Err(DomainError::username_exists(normalize_identifier(username)));
            }
            user.update_username(username)?;
        }

        self.repository.update(&user).await?;
        debug!(user_id = %user.id(), "Updated user");

        Ok(user)
    }

    /// Delete a user
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let user_id = UserId::from(id);

        self.repository.get_by_id(&user_id).await?;
        self.repository.delete(&user_id).await?;
        info!(user_id = %user_id, "Deleted user");

        Ok(())
    }
}
