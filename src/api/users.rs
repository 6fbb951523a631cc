//! User CRUD endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CreateUserBody, Json, ListUsersResponse, UpdateUserBody, UserResponse,
};

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(email = %body.email, username = %body.username, "Creating user");

    let user = state.user_service.create(body.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    debug!("Listing users");

    let users = state.user_service.list().await?;

    Ok(Json(ListUsersResponse {
        users: users.iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %id, "Getting user");

    let user = state.user_service.get(&id).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserBody>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %id, "Updating user");

    let user = state.user_service.update(&id, body.into()).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(user_id = %id, "Deleting user");

    state.user_service.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
