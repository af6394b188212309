// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, RegisterRequest},
    repo::{NewUser, Repos},
    utils::{
        jwt::{Claims, sign_jwt},
        password,
    },
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created, a signed token and the user (excluding the hash);
/// 409 when the email is already in use.
pub async fn register(
    State(repos): State<Repos>,
    State(config): State<Config>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let hashed_password = password::hash(&payload.password)?;

    let user = repos
        .users
        .create(NewUser {
            name: payload.name,
            email: payload.email,
            password: hashed_password,
            role: "user".to_string(),
        })
        .await?;

    let token = sign_jwt(
        user.id,
        &user.email,
        &user.role,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    tracing::info!(user_id = user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "token": token,
            "user": user.to_response(),
        })),
    ))
}

/// Authenticates a user and returns a JWT token.
///
/// The failure message is identical for an unknown email and a wrong
/// password, so the endpoint cannot be used to enumerate accounts.
pub async fn login(
    State(repos): State<Repos>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = repos
        .users
        .find_by_email(&payload.email)
        .await
        .ok_or_else(|| AppError::AuthError("Invalid credentials".to_string()))?;

    let is_valid = password::verify(&payload.password, &user.password)?;
    if !is_valid {
        return Err(AppError::AuthError("Invalid credentials".to_string()));
    }

    let token = sign_jwt(
        user.id,
        &user.email,
        &user.role,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "user": user.to_response(),
    })))
}

/// Returns the profile of the token holder.
pub async fn profile(
    State(repos): State<Repos>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = repos
        .users
        .find_by_id(claims.user_id())
        .await
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "user": user.to_response() })))
}
