// src/handlers/exams.rs

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    error::AppError,
    models::exam::SubmitRequest,
    models::result::NewResultRecord,
    quiz::{SessionStore, scoring},
    repo::Repos,
    utils::jwt::Claims,
};

/// Lists all exams as summaries (no questions).
pub async fn list_exams(State(repos): State<Repos>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(repos.exams.list().await))
}

/// Retrieves one exam's summary.
pub async fn get_exam(
    State(repos): State<Repos>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam = repos
        .exams
        .find(id)
        .await
        .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))?;

    Ok(Json(exam.summary()))
}

/// Starts a timed attempt at an exam.
///
/// Replaces any session the user already has and returns the fresh session
/// view - the public projection of the exam (answer keys stripped), a full
/// clock and an empty answer set. An unknown exam id fails before any
/// session state is touched.
pub async fn start_exam(
    State(repos): State<Repos>,
    State(sessions): State<SessionStore>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam = repos
        .exams
        .find(id)
        .await
        .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))?;

    tracing::info!(user_id = claims.user_id(), exam_id = id, "quiz started");
    let view = sessions.start(claims.user_id(), exam);

    Ok((StatusCode::CREATED, Json(view)))
}

/// The stateless answer-submission boundary.
///
/// Takes the collected answers plus the time spent, scores them against the
/// full exam server-side and returns the result with the per-question
/// breakdown - the first time correct options and explanations ever leave
/// the server. Duplicate answers for one question keep the last one. Any
/// active session of the caller is discarded, its countdown stopped.
pub async fn submit_exam(
    State(repos): State<Repos>,
    State(sessions): State<SessionStore>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<SubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exam = repos
        .exams
        .find(id)
        .await
        .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))?;

    let mut answers: HashMap<i64, u32> = HashMap::new();
    for answer in payload.answers {
        answers.insert(answer.question_id, answer.chosen_option);
    }

    let result = scoring::score_exam(&exam, &answers, payload.time_spent_secs);

    repos
        .results
        .create(NewResultRecord {
            user_id: claims.user_id(),
            result: result.clone(),
            taken_at: Utc::now(),
        })
        .await;

    sessions.clear(claims.user_id());

    tracing::info!(
        user_id = claims.user_id(),
        exam_id = id,
        percentage = result.percentage,
        "exam submitted"
    );

    Ok(Json(result))
}
