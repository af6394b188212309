// src/models/exam.rs

use serde::{Deserialize, Serialize};

/// A mock exam with its full question set, answer keys included.
///
/// Deliberately NOT `Serialize`: the answer key must never be able to reach
/// a response body. Clients only ever see [`ExamSummary`] (browsing) or
/// [`PublicExam`] (taking), both produced by the projection methods below.
#[derive(Debug, Clone)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Subjects covered, e.g. "Direito Constitucional".
    pub subjects: Vec<String>,
    /// Time allowed for one attempt, in seconds.
    pub duration_secs: u32,
    pub questions: Vec<Question>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One multiple-choice question with exactly one correct option.
/// Not `Serialize` for the same reason as [`Exam`].
#[derive(Debug, Clone)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    /// 0-based index into `options`.
    pub correct_option: u32,
    pub subject: String,
    pub explanation: String,
}

impl Exam {
    /// Browsing view: metadata only, no questions.
    pub fn summary(&self) -> ExamSummary {
        ExamSummary {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            subjects: self.subjects.clone(),
            question_count: self.questions.len(),
            duration_secs: self.duration_secs,
        }
    }

    /// Quiz-taking view: questions with the correct option and explanation
    /// stripped.
    pub fn public_projection(&self) -> PublicExam {
        PublicExam {
            id: self.id,
            title: self.title.clone(),
            duration_secs: self.duration_secs,
            questions: self
                .questions
                .iter()
                .map(|q| PublicQuestion {
                    id: q.id,
                    text: q.text.clone(),
                    options: q.options.clone(),
                    subject: q.subject.clone(),
                })
                .collect(),
        }
    }
}

/// DTO listing an exam without its questions.
#[derive(Debug, Clone, Serialize)]
pub struct ExamSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub subjects: Vec<String>,
    pub question_count: usize,
    pub duration_secs: u32,
}

/// DTO for an exam as handed to a quiz taker at start.
#[derive(Debug, Clone, Serialize)]
pub struct PublicExam {
    pub id: i64,
    pub title: String,
    pub duration_secs: u32,
    pub questions: Vec<PublicQuestion>,
}

/// DTO for a question as handed to a quiz taker (no answer, no explanation).
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    pub subject: String,
}

/// One submitted answer: the chosen option for a question.
/// Out-of-range indices are accepted; they simply never match.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerInput {
    pub question_id: i64,
    pub chosen_option: u32,
}

/// DTO for the stateless answer-submission boundary.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<AnswerInput>,
    pub time_spent_secs: u64,
}
