// src/models/stats.rs

use serde::Serialize;

/// Lifetime totals across every recorded attempt of one user.
#[derive(Debug, Serialize)]
pub struct OverallStats {
    pub total_exams: u32,
    pub total_questions: u32,
    pub correct: u32,
    pub wrong: u32,
    /// Average attempt time, human formatted (e.g. "42min").
    pub average_time: String,
}

/// Aggregated accuracy for one subject across all attempts.
#[derive(Debug, Serialize)]
pub struct SubjectStats {
    pub subject: String,
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
}

/// One past attempt, as listed in the history view.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub date: chrono::DateTime<chrono::Utc>,
    pub exam_title: String,
    pub correct: u32,
    pub total: u32,
    pub time: String,
}

/// Combined statistics payload.
#[derive(Debug, Serialize)]
pub struct AllStats {
    pub overall: OverallStats,
    pub subjects: Vec<SubjectStats>,
    pub history: Vec<HistoryEntry>,
}
