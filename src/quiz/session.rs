// src/quiz/session.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::exam::{Exam, PublicExam};
use crate::models::result::ExamResult;

use super::scoring;

/// One in-progress (or just-finished) attempt at a single exam.
///
/// Holds the full exam, answer keys included; only [`SessionView`] ever
/// leaves this type, and the view carries the public projection. Presence
/// of `result` is the completion flag: a completed session stops ticking,
/// rejects answers and returns the stored result on repeated finishes.
#[derive(Debug)]
pub struct QuizSession {
    exam: Exam,
    /// question id -> chosen option index. Upsert; last write wins.
    answers: HashMap<i64, u32>,
    current_question: usize,
    remaining_secs: u32,
    started_at: DateTime<Utc>,
    result: Option<ExamResult>,
}

/// Client-safe snapshot of a session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub exam: PublicExam,
    pub answers: HashMap<i64, u32>,
    pub current_question: usize,
    pub remaining_secs: u32,
    pub completed: bool,
    pub result: Option<ExamResult>,
}

/// Which way the quiz taker is moving through the questions.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

impl QuizSession {
    pub fn new(exam: Exam, started_at: DateTime<Utc>) -> Self {
        let remaining_secs = exam.duration_secs;
        Self {
            exam,
            answers: HashMap::new(),
            current_question: 0,
            remaining_secs,
            started_at,
            result: None,
        }
    }

    pub fn exam_id(&self) -> i64 {
        self.exam.id
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    /// Records (or replaces) the answer for a question.
    pub fn select_answer(&mut self, question_id: i64, chosen_option: u32) -> Result<(), AppError> {
        if self.is_completed() {
            return Err(AppError::InvalidState(
                "Quiz session already finished".to_string(),
            ));
        }
        self.answers.insert(question_id, chosen_option);
        Ok(())
    }

    /// One second of countdown. Returns the result when this tick exhausted
    /// the clock (auto-finish); `None` otherwise. No-op once completed.
    pub fn tick(&mut self) -> Option<ExamResult> {
        if self.is_completed() {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            // Timer expiry means the whole allotted time was used, so the
            // reported elapsed time is the declared duration - independent
            // of how ticks map onto the wall clock.
            return Some(self.finish_with_elapsed(u64::from(self.exam.duration_secs)));
        }
        None
    }

    /// Freezes the session and scores it. Idempotent: a completed session
    /// returns the stored result without recomputing elapsed time.
    pub fn finish(&mut self, now: DateTime<Utc>) -> ExamResult {
        if let Some(result) = &self.result {
            return result.clone();
        }
        let elapsed = (now - self.started_at)
            .num_seconds()
            .clamp(0, i64::from(self.exam.duration_secs)) as u64;
        self.finish_with_elapsed(elapsed)
    }

    fn finish_with_elapsed(&mut self, elapsed_secs: u64) -> ExamResult {
        let result = scoring::score_exam(&self.exam, &self.answers, elapsed_secs);
        self.result = Some(result.clone());
        result
    }

    /// Moves the displayed question one step. The index clamps to
    /// `[0, last]`; moving forward past the last question finishes the
    /// session (same path as timer expiry) and returns the fresh result.
    /// On a completed session navigation only moves the cursor, so results
    /// can be reviewed question by question.
    pub fn navigate(&mut self, direction: Direction, now: DateTime<Utc>) -> Option<ExamResult> {
        match direction {
            Direction::Previous => {
                self.current_question = self.current_question.saturating_sub(1);
                None
            }
            Direction::Next => {
                let last = self.exam.questions.len().saturating_sub(1);
                if self.current_question < last {
                    self.current_question += 1;
                    None
                } else if self.is_completed() {
                    None
                } else {
                    Some(self.finish(now))
                }
            }
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            exam: self.exam.public_projection(),
            answers: self.answers.clone(),
            current_question: self.current_question,
            remaining_secs: self.remaining_secs,
            completed: self.is_completed(),
            result: self.result.clone(),
        }
    }
}
