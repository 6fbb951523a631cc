//! User request and response bodies

use serde::{Deserialize, Serialize};

use crate::domain::User;
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// POST /api/v1/users body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserBody {
    pub name: String,
    pub email: String,
    pub username: String,
}

impl From<CreateUserBody> for CreateUserRequest {
    fn from(body: CreateUserBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            username: body.username,
        }
    }
}

/// PUT /api/v1/users/{id} body; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl From<UpdateUserBody> for UpdateUserRequest {
    fn from(body: UpdateUserBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            username: body.username,
        }
    }
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// GET /api/v1/users body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
}
