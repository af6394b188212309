// src/handlers/users.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{UpdateUserRequest, UserResponse},
    repo::Repos,
    utils::jwt::Claims,
};

/// Lists all registered users.
pub async fn list_users(State(repos): State<Repos>) -> Result<impl IntoResponse, AppError> {
    let users: Vec<UserResponse> = repos
        .users
        .list()
        .await
        .iter()
        .map(|u| u.to_response())
        .collect();

    Ok(Json(users))
}

/// Retrieves a single user by id.
pub async fn get_user(
    State(repos): State<Repos>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = repos
        .users
        .find_by_id(id)
        .await
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.to_response()))
}

/// Updates a user's name and/or email.
pub async fn update_user(
    State(repos): State<Repos>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = repos.users.update(id, payload.name, payload.email).await?;

    Ok(Json(user.to_response()))
}

/// Deletes a user by id. Deleting the account the token belongs to is
/// rejected.
pub async fn delete_user(
    State(repos): State<Repos>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if id == claims.user_id() {
        return Err(AppError::BadRequest("Cannot delete yourself".to_string()));
    }

    repos.users.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
