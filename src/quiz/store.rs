// src/quiz/store.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::error::AppError;
use crate::models::exam::Exam;
use crate::models::result::{ExamResult, NewResultRecord};
use crate::repo::ResultRepo;

use super::session::{Direction, QuizSession, SessionView};

/// Holds at most one quiz session per user and drives their countdowns.
///
/// The ticker task behind a running session is a scoped resource: its
/// handle lives in the session entry and is aborted on every transition out
/// of Running - manual finish, clear, replacement by a new start - while
/// the task itself stops as soon as it observes the session gone or
/// completed. Every finish path, timer expiry included, persists the result
/// through the injected [`ResultRepo`].
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<i64, SessionEntry>>>,
    results: Arc<dyn ResultRepo>,
}

struct SessionEntry {
    session: QuizSession,
    ticker: Option<JoinHandle<()>>,
}

impl SessionEntry {
    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

/// What one ticker iteration decided, with the lock already released.
enum Tick {
    Keep,
    Expired(ExamResult),
    Stop,
}

impl SessionStore {
    pub fn new(results: Arc<dyn ResultRepo>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            results,
        }
    }

    /// Starts a fresh session for the user, replacing (and stopping the
    /// ticker of) any previous one. The caller resolves the exam first, so
    /// a failed fetch never creates a partial session.
    pub fn start(&self, user_id: i64, exam: Exam) -> SessionView {
        let session = QuizSession::new(exam, Utc::now());
        let view = session.view();
        {
            let mut sessions = self.inner.lock().unwrap();
            if let Some(mut previous) = sessions.insert(
                user_id,
                SessionEntry {
                    session,
                    ticker: None,
                },
            ) {
                previous.stop_ticker();
            }
        }
        let handle = self.spawn_ticker(user_id);
        if let Some(entry) = self.inner.lock().unwrap().get_mut(&user_id) {
            entry.ticker = Some(handle);
        }
        view
    }

    pub fn current(&self, user_id: i64) -> Result<SessionView, AppError> {
        let sessions = self.inner.lock().unwrap();
        let entry = sessions.get(&user_id).ok_or_else(Self::no_session)?;
        Ok(entry.session.view())
    }

    pub fn select_answer(
        &self,
        user_id: i64,
        question_id: i64,
        chosen_option: u32,
    ) -> Result<SessionView, AppError> {
        let mut sessions = self.inner.lock().unwrap();
        let entry = sessions.get_mut(&user_id).ok_or_else(Self::no_session)?;
        entry.session.select_answer(question_id, chosen_option)?;
        Ok(entry.session.view())
    }

    /// Manual finish. Stops the ticker, scores, persists the result.
    /// Idempotent: finishing an already-completed session returns the same
    /// result and does not record it a second time.
    pub async fn finish(&self, user_id: i64) -> Result<ExamResult, AppError> {
        let (result, newly_finished) = {
            let mut sessions = self.inner.lock().unwrap();
            let entry = sessions.get_mut(&user_id).ok_or_else(Self::no_session)?;
            let newly_finished = !entry.session.is_completed();
            if newly_finished {
                entry.stop_ticker();
            }
            (entry.session.finish(Utc::now()), newly_finished)
        };
        if newly_finished {
            self.record(user_id, result.clone()).await;
        }
        Ok(result)
    }

    /// Moves the question cursor; advancing past the last question takes
    /// the same finish path as timer expiry.
    pub async fn navigate(
        &self,
        user_id: i64,
        direction: Direction,
    ) -> Result<SessionView, AppError> {
        let (view, finished) = {
            let mut sessions = self.inner.lock().unwrap();
            let entry = sessions.get_mut(&user_id).ok_or_else(Self::no_session)?;
            let finished = entry.session.navigate(direction, Utc::now());
            if finished.is_some() {
                entry.stop_ticker();
            }
            (entry.session.view(), finished)
        };
        if let Some(result) = finished {
            self.record(user_id, result).await;
        }
        Ok(view)
    }

    /// Drops the user's session, running or completed. Safe to call when
    /// none exists.
    pub fn clear(&self, user_id: i64) {
        let mut sessions = self.inner.lock().unwrap();
        if let Some(mut entry) = sessions.remove(&user_id) {
            entry.stop_ticker();
        }
    }

    fn spawn_ticker(&self, user_id: i64) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let outcome = {
                    let mut sessions = store.inner.lock().unwrap();
                    match sessions.get_mut(&user_id) {
                        None => Tick::Stop,
                        Some(entry) if entry.session.is_completed() => Tick::Stop,
                        Some(entry) => match entry.session.tick() {
                            Some(result) => Tick::Expired(result),
                            None => Tick::Keep,
                        },
                    }
                };
                match outcome {
                    Tick::Keep => {}
                    Tick::Stop => break,
                    Tick::Expired(result) => {
                        tracing::info!(user_id, "quiz session expired, auto-finishing");
                        store.record(user_id, result).await;
                        break;
                    }
                }
            }
        })
    }

    async fn record(&self, user_id: i64, result: ExamResult) {
        self.results
            .create(NewResultRecord {
                user_id,
                result,
                taken_at: Utc::now(),
            })
            .await;
    }

    fn no_session() -> AppError {
        AppError::InvalidState("No active quiz session".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exam::Question;
    use crate::repo::memory::MemoryResultRepo;

    fn exam(duration_secs: u32, question_count: usize) -> Exam {
        let questions = (0..question_count)
            .map(|i| Question {
                id: i as i64 + 1,
                text: format!("Question {}", i + 1),
                options: vec!["A".into(), "B".into(), "C".into()],
                correct_option: 0,
                subject: "Direito Constitucional".to_string(),
                explanation: String::new(),
            })
            .collect();
        Exam {
            id: 1,
            title: "Fixture".to_string(),
            description: String::new(),
            subjects: vec!["Direito Constitucional".to_string()],
            duration_secs,
            questions,
            created_at: Utc::now(),
        }
    }

    fn store_with_repo() -> (SessionStore, Arc<MemoryResultRepo>) {
        let repo = Arc::new(MemoryResultRepo::new());
        (SessionStore::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn finish_records_exactly_once() {
        let (store, repo) = store_with_repo();
        store.start(1, exam(600, 2));
        store.select_answer(1, 1, 0).unwrap();

        let first = store.finish(1).await.unwrap();
        let second = store.finish(1).await.unwrap();

        assert_eq!(first.correct_count, 1);
        assert_eq!(first.time_spent_secs, second.time_spent_secs);
        assert_eq!(repo.list_by_user(1).await.len(), 1);
    }

    #[tokio::test]
    async fn operations_without_a_session_are_invalid_state() {
        let (store, _repo) = store_with_repo();
        assert!(matches!(store.current(9), Err(AppError::InvalidState(_))));
        assert!(matches!(
            store.select_answer(9, 1, 0),
            Err(AppError::InvalidState(_))
        ));
        assert!(matches!(
            store.finish(9).await,
            Err(AppError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn clear_removes_the_session() {
        let (store, repo) = store_with_repo();
        store.start(1, exam(600, 1));
        store.clear(1);
        assert!(store.current(1).is_err());
        // A cleared session was never finished, so nothing was recorded.
        assert!(repo.list_by_user(1).await.is_empty());
    }

    #[tokio::test]
    async fn starting_again_replaces_the_previous_session() {
        let (store, _repo) = store_with_repo();
        store.start(1, exam(600, 2));
        store.select_answer(1, 1, 0).unwrap();

        store.start(1, exam(600, 2));
        let view = store.current(1).unwrap();
        assert!(view.answers.is_empty());
        assert!(!view.completed);
    }

    #[tokio::test]
    async fn navigating_past_the_end_finishes_and_records() {
        let (store, repo) = store_with_repo();
        store.start(1, exam(600, 2));
        store.navigate(1, Direction::Next).await.unwrap();
        let view = store.navigate(1, Direction::Next).await.unwrap();

        assert!(view.completed);
        let result = view.result.expect("finished view carries the result");
        assert_eq!(result.total_questions, 2);
        assert_eq!(repo.list_by_user(1).await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_expiry_auto_finishes_and_records() {
        let (store, repo) = store_with_repo();
        store.start(1, exam(3, 2));

        // Paused-clock sleep: the runtime advances straight through the
        // ticker's one-second intervals.
        tokio::time::sleep(Duration::from_secs(5)).await;

        let view = store.current(1).unwrap();
        assert!(view.completed);
        assert_eq!(view.remaining_secs, 0);
        let result = view.result.expect("expired session carries the result");
        assert_eq!(result.time_spent_secs, 3);

        let records = repo.list_by_user(1).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total_questions, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_finish_stops_the_countdown() {
        let (store, repo) = store_with_repo();
        store.start(1, exam(2, 1));
        store.finish(1).await.unwrap();

        // Long past the would-be expiry; the aborted ticker must not have
        // double-recorded.
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(repo.list_by_user(1).await.len(), 1);
    }
}
