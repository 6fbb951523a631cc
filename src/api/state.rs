//! Application state for shared services

use std::sync::Arc;

use crate::domain::UserRepository;
use crate::infrastructure::user::UserService;

/// Application state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub user_service: UserService,
}

impl AppState {
    pub fn new(user_service: UserService) -> Self {
        Self { user_service }
    }

    /// Build state around a repository chosen at startup
    pub fn with_repository(repository: Arc<dyn UserRepository>) -> Self {
        Self::new(UserService::new(repository))
    }
}
