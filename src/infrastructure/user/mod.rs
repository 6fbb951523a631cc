//! User infrastructure module
//!
//! This module provides the two user repository backends (in-memory and
//! PostgreSQL) and the user service that orchestrates them.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UpdateUserRequest, UserService};
