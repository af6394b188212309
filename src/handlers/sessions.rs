// src/handlers/sessions.rs
//
// Operations on the caller's active quiz session. Every endpoint answers
// 409 when no session exists; sessions are created by `exams::start_exam`.

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::exam::AnswerInput,
    quiz::{Direction, SessionStore},
    utils::jwt::Claims,
};

/// Snapshot of the caller's session: public exam, own answers, cursor,
/// remaining time and - once finished - the result.
pub async fn current_session(
    State(sessions): State<SessionStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.current(claims.user_id())?))
}

/// Records (or replaces) the answer for one question.
pub async fn select_answer(
    State(sessions): State<SessionStore>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AnswerInput>,
) -> Result<impl IntoResponse, AppError> {
    let view = sessions.select_answer(claims.user_id(), payload.question_id, payload.chosen_option)?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub direction: Direction,
}

/// Moves the question cursor. Advancing past the last question finishes
/// the attempt, so the returned view may carry the result.
pub async fn navigate(
    State(sessions): State<SessionStore>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<NavigateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let view = sessions.navigate(claims.user_id(), payload.direction).await?;
    Ok(Json(view))
}

/// Finishes the attempt ahead of the clock and returns the result.
pub async fn finish_session(
    State(sessions): State<SessionStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let result = sessions.finish(claims.user_id()).await?;
    Ok(Json(result))
}

/// Discards the caller's session, finished or not. Idempotent.
pub async fn clear_session(
    State(sessions): State<SessionStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    sessions.clear(claims.user_id());
    Ok(StatusCode::NO_CONTENT)
}
