// src/repo/mod.rs
//
// Repository traits decoupling handlers from storage. The shipped
// implementations are in-memory (this system has no real database); a
// persistent store can be substituted without touching callers.

pub mod memory;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::exam::{Exam, ExamSummary};
use crate::models::result::{NewResultRecord, ResultRecord};
use crate::models::subscription::{Plan, Subscription};
use crate::models::user::User;

/// Payload for creating a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Creates a user; fails with `Conflict` when the email is taken.
    async fn create(&self, new: NewUser) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    async fn find_by_id(&self, id: i64) -> Option<User>;
    async fn list(&self) -> Vec<User>;
    /// Applies the present fields; fails with `NotFound` for an unknown id
    /// and `Conflict` when the new email belongs to another user.
    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<User, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

/// Payload for creating an exam; ids are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewExam {
    pub title: String,
    pub description: String,
    pub subjects: Vec<String>,
    pub duration_secs: u32,
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: u32,
    pub subject: String,
    pub explanation: String,
}

#[async_trait]
pub trait ExamRepo: Send + Sync {
    async fn list(&self) -> Vec<ExamSummary>;
    /// The full exam, answer keys included. Trusted-side use only; handlers
    /// must serialize projections, never this value.
    async fn find(&self, id: i64) -> Option<Exam>;
    async fn create(&self, new: NewExam) -> Exam;
}

#[async_trait]
pub trait PlanRepo: Send + Sync {
    async fn list(&self) -> Vec<Plan>;
    async fn find(&self, id: &str) -> Option<Plan>;
}

/// Payload for creating a subscription.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub user_id: i64,
    pub plan_id: String,
    pub status: String,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub amount_paid: u32,
    pub payment_method: String,
}

#[async_trait]
pub trait SubscriptionRepo: Send + Sync {
    /// The user's most recent subscription, active or not.
    async fn find_by_user(&self, user_id: i64) -> Option<Subscription>;
    async fn find_active_by_user(&self, user_id: i64) -> Option<Subscription>;
    async fn create(&self, new: NewSubscription) -> Subscription;
    /// Marks the user's active subscription as canceled, returning it.
    async fn cancel_active(&self, user_id: i64) -> Option<Subscription>;
}

#[async_trait]
pub trait ResultRepo: Send + Sync {
    async fn create(&self, new: NewResultRecord) -> ResultRecord;
    async fn list_by_user(&self, user_id: i64) -> Vec<ResultRecord>;
}

/// The full repository set, shared across handlers through `AppState`.
#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn UserRepo>,
    pub exams: Arc<dyn ExamRepo>,
    pub plans: Arc<dyn PlanRepo>,
    pub subscriptions: Arc<dyn SubscriptionRepo>,
    pub results: Arc<dyn ResultRepo>,
}

impl Repos {
    /// Fresh in-memory repositories with the static plan catalog loaded.
    /// Demo users/exams/subscriptions are seeded separately by
    /// [`seed::load_demo_data`].
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(memory::MemoryUserRepo::new()),
            exams: Arc::new(memory::MemoryExamRepo::new()),
            plans: Arc::new(memory::MemoryPlanRepo::new(seed::plan_catalog())),
            subscriptions: Arc::new(memory::MemorySubscriptionRepo::new()),
            results: Arc::new(memory::MemoryResultRepo::new()),
        }
    }
}
