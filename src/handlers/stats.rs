// src/handlers/stats.rs
//
// Performance statistics, aggregated on the fly from the caller's recorded
// results. Nothing here is stored; the result records are the single
// source of truth.

use std::collections::BTreeMap;

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    models::result::ResultRecord,
    models::stats::{AllStats, HistoryEntry, OverallStats, SubjectStats},
    quiz::scoring,
    repo::Repos,
    utils::{format::format_duration, jwt::Claims},
};

/// Combined statistics: totals, per-subject accuracy and attempt history.
pub async fn all_stats(
    State(repos): State<Repos>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let records = repos.results.list_by_user(claims.user_id()).await;
    Ok(Json(AllStats {
        overall: compute_overall(&records),
        subjects: compute_subjects(&records),
        history: compute_history(&records),
    }))
}

pub async fn overall_stats(
    State(repos): State<Repos>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let records = repos.results.list_by_user(claims.user_id()).await;
    Ok(Json(compute_overall(&records)))
}

pub async fn subject_stats(
    State(repos): State<Repos>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let records = repos.results.list_by_user(claims.user_id()).await;
    Ok(Json(compute_subjects(&records)))
}

pub async fn history(
    State(repos): State<Repos>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let records = repos.results.list_by_user(claims.user_id()).await;
    Ok(Json(compute_history(&records)))
}

fn compute_overall(records: &[ResultRecord]) -> OverallStats {
    let total_exams = records.len() as u32;
    let total_questions: u32 = records.iter().map(|r| r.total_questions).sum();
    let correct: u32 = records.iter().map(|r| r.correct_count).sum();
    let total_time: u64 = records.iter().map(|r| r.time_spent_secs).sum();
    let average_secs = if total_exams == 0 {
        0
    } else {
        total_time / u64::from(total_exams)
    };

    OverallStats {
        total_exams,
        total_questions,
        correct,
        wrong: total_questions - correct,
        average_time: format_duration(average_secs),
    }
}

fn compute_subjects(records: &[ResultRecord]) -> Vec<SubjectStats> {
    // BTreeMap keeps the subject order stable across calls.
    let mut by_subject: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for record in records {
        for outcome in &record.breakdown {
            let entry = by_subject.entry(outcome.subject.as_str()).or_insert((0, 0));
            entry.1 += 1;
            if outcome.correct {
                entry.0 += 1;
            }
        }
    }
    by_subject
        .into_iter()
        .map(|(subject, (correct, total))| SubjectStats {
            subject: subject.to_string(),
            correct,
            total,
            percentage: scoring::percentage(correct, total),
        })
        .collect()
}

fn compute_history(records: &[ResultRecord]) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = records
        .iter()
        .map(|r| HistoryEntry {
            id: r.id,
            date: r.taken_at,
            exam_title: r.exam_title.clone(),
            correct: r.correct_count,
            total: r.total_questions,
            time: format_duration(r.time_spent_secs),
        })
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::result::QuestionOutcome;
    use chrono::{Duration, Utc};

    fn record(
        id: i64,
        correct: u32,
        total: u32,
        time_spent_secs: u64,
        minutes_ago: i64,
    ) -> ResultRecord {
        let breakdown = (0..total)
            .map(|i| QuestionOutcome {
                question_id: i64::from(i) + 1,
                subject: if i % 2 == 0 { "Português" } else { "Direito" }.to_string(),
                correct: i < correct,
                chosen_option: Some(0),
                correct_option: 0,
                explanation: String::new(),
            })
            .collect();
        ResultRecord {
            id,
            user_id: 1,
            exam_id: 1,
            exam_title: "Simulado Completo".to_string(),
            total_questions: total,
            correct_count: correct,
            percentage: scoring::percentage(correct, total),
            time_spent_secs,
            taken_at: Utc::now() - Duration::minutes(minutes_ago),
            breakdown,
        }
    }

    #[test]
    fn overall_sums_across_records() {
        let records = vec![record(1, 2, 4, 100, 10), record(2, 3, 4, 200, 5)];
        let overall = compute_overall(&records);
        assert_eq!(overall.total_exams, 2);
        assert_eq!(overall.total_questions, 8);
        assert_eq!(overall.correct, 5);
        assert_eq!(overall.wrong, 3);
        assert_eq!(overall.average_time, "2min"); // (100 + 200) / 2 = 150s
    }

    #[test]
    fn overall_of_no_records_is_all_zero() {
        let overall = compute_overall(&[]);
        assert_eq!(overall.total_exams, 0);
        assert_eq!(overall.total_questions, 0);
        assert_eq!(overall.average_time, "0s");
    }

    #[test]
    fn subjects_aggregate_breakdowns() {
        // 4 questions: subjects alternate Português/Direito, first 2 correct.
        let records = vec![record(1, 2, 4, 100, 10)];
        let subjects = compute_subjects(&records);
        assert_eq!(subjects.len(), 2);

        let direito = subjects.iter().find(|s| s.subject == "Direito").unwrap();
        assert_eq!((direito.correct, direito.total), (1, 2));

        let portugues = subjects.iter().find(|s| s.subject == "Português").unwrap();
        assert_eq!((portugues.correct, portugues.total), (1, 2));
    }

    #[test]
    fn history_is_newest_first() {
        let records = vec![record(1, 1, 2, 60, 60), record(2, 2, 2, 90, 5)];
        let history = compute_history(&records);
        assert_eq!(history[0].id, 2);
        assert_eq!(history[1].id, 1);
        assert_eq!(history[0].time, "1min");
    }
}
