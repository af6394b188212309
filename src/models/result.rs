// src/models/result.rs

use serde::Serialize;

/// The scored outcome of one finished attempt. Derived once by the scoring
/// function and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ExamResult {
    pub exam_id: i64,
    pub title: String,
    pub total_questions: u32,
    pub correct_count: u32,
    /// Integer percentage, rounded half-up. 0 for a zero-question exam.
    pub percentage: u32,
    pub time_spent_secs: u64,
    /// One entry per question, in exam order (not submission order).
    pub breakdown: Vec<QuestionOutcome>,
}

/// Per-question detail of a result. Carries the correct option and the
/// explanation - safe only because it exists post-submission.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionOutcome {
    pub question_id: i64,
    pub subject: String,
    pub correct: bool,
    /// `None` when the question was never answered.
    pub chosen_option: Option<u32>,
    pub correct_option: u32,
    pub explanation: String,
}

/// A recorded result, as kept per user for statistics and history.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    pub id: i64,
    pub user_id: i64,
    pub exam_id: i64,
    pub exam_title: String,
    pub total_questions: u32,
    pub correct_count: u32,
    pub percentage: u32,
    pub time_spent_secs: u64,
    pub taken_at: chrono::DateTime<chrono::Utc>,
    pub breakdown: Vec<QuestionOutcome>,
}

/// Payload for persisting a freshly scored result.
#[derive(Debug, Clone)]
pub struct NewResultRecord {
    pub user_id: i64,
    pub result: ExamResult,
    pub taken_at: chrono::DateTime<chrono::Utc>,
}
