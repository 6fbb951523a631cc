//! User aggregate and identifier

use uuid::Uuid;

use super::validation::{
    normalize_identifier, normalize_name, validate_email, validate_name, validate_username,
    UserValidationError,
};

/// Opaque user identifier, a random UUID assigned at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Generate a fresh, globally unique identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User aggregate root
///
/// Field invariants (non-empty name, well-formed email, username of at
/// least three characters) hold after every constructor and mutator call.
/// Email/username uniqueness across users is not visible from here and is
/// enforced by the service together with the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    username: String,
}

impl User {
    /// Create a new user with a freshly generated ID
    ///
    /// Fields are validated in the order name, email, username and the
    /// first violation is returned.
    pub fn create(
        name: &str,
        email: &str,
        username: &str,
    ) -> Result<Self, UserValidationError> {
        validate_name(name)?;
        validate_email(email)?;
        validate_username(username)?;

        Ok(Self {
            id: UserId::generate(),
            name: normalize_name(name),
            email: normalize_identifier(email),
            username: normalize_identifier(username),
        })
    }

    /// Rebuild a user from stored fields without re-validating
    pub(crate) fn restore(id: UserId, name: String, email: String, username: String) -> Self {
        Self {
            id,
            name,
            email,
            username,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    // Mutators

    /// Update the name; leaves the user untouched on failure
    pub fn update_name(&mut self, name: &str) -> Result<(), UserValidationError> {
        validate_name(name)?;
        self.name = normalize_name(name);
        Ok(())
    }

    /// Update the email; leaves the user untouched on failure
    pub fn update_email(&mut self, email: &str) -> Result<(), UserValidationError> {
        validate_email(email)?;
        self.email = normalize_identifier(email);
        Ok(())
    }

    /// Update the username; leaves the user untouched on failure
    pub fn update_username(&mut self, username: &str) -> Result<(), UserValidationError> {
        validate_username(username)?;
        self.username = normalize_identifier(username);
        Ok(())
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User{{ID: {}, Name: {}, Email: {}, Username: {}}}",
            self.id, self.name, self.email, self.username
        )
    }
}
