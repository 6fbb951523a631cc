//! User Profile Service
//!
//! CRUD over a single user aggregate with:
//! - Validated, normalized name/email/username fields
//! - Email and username uniqueness checked by the service and, on
//!   PostgreSQL, backed by unique indexes
//! - In-memory or PostgreSQL storage selected at startup

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{DomainError, User, UserId, UserRepository};
pub use infrastructure::user::{CreateUserRequest, UpdateUserRequest, UserService};
