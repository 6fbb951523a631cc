//! User domain
//!
//! This module provides the user aggregate, its field validation rules,
//! and the repository trait both storage backends implement.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::UserRepository;
pub use validation::{
    normalize_identifier, normalize_name, validate_email, validate_name, validate_username,
    UserValidationError, MIN_USERNAME_LENGTH,
};

#[cfg(test)]
pub use repository::MockUserRepository;
