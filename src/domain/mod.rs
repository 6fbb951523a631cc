//! Domain layer - the user aggregate and its repository contract

pub mod error;
pub mod user;

pub use error::DomainError;
pub use user::{User, UserId, UserRepository, UserValidationError};
