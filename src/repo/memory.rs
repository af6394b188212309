// src/repo/memory.rs
//
// In-memory repository implementations. Each keeps its rows in a
// `RwLock<Vec<_>>` and allocates ids from an atomic counter; no guard is
// ever held across an await point.

use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::exam::{Exam, ExamSummary, Question};
use crate::models::result::{NewResultRecord, ResultRecord};
use crate::models::subscription::{Plan, STATUS_ACTIVE, STATUS_CANCELED, Subscription};
use crate::models::user::User;

use super::{
    ExamRepo, NewExam, NewSubscription, NewUser, PlanRepo, ResultRepo, SubscriptionRepo, UserRepo,
};

pub struct MemoryUserRepo {
    users: RwLock<Vec<User>>,
    next_id: AtomicI64,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryUserRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn create(&self, new: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().unwrap();
        if users.iter().any(|u| u.email == new.email) {
            return Err(AppError::Conflict(format!(
                "Email '{}' is already in use",
                new.email
            )));
        }
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: new.name,
            email: new.email,
            password: new.password,
            role: new.role,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    async fn find_by_id(&self, id: i64) -> Option<User> {
        self.users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    async fn list(&self) -> Vec<User> {
        self.users.read().unwrap().clone()
    }

    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<User, AppError> {
        let mut users = self.users.write().unwrap();
        if let Some(new_email) = &email {
            if users.iter().any(|u| u.id != id && &u.email == new_email) {
                return Err(AppError::Conflict(format!(
                    "Email '{}' is already in use",
                    new_email
                )));
            }
        }
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut users = self.users.write().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}

pub struct MemoryExamRepo {
    exams: RwLock<Vec<Exam>>,
    next_exam_id: AtomicI64,
    next_question_id: AtomicI64,
}

impl MemoryExamRepo {
    pub fn new() -> Self {
        Self {
            exams: RwLock::new(Vec::new()),
            next_exam_id: AtomicI64::new(1),
            next_question_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryExamRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExamRepo for MemoryExamRepo {
    async fn list(&self) -> Vec<ExamSummary> {
        self.exams.read().unwrap().iter().map(Exam::summary).collect()
    }

    async fn find(&self, id: i64) -> Option<Exam> {
        self.exams
            .read()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    async fn create(&self, new: NewExam) -> Exam {
        let questions = new
            .questions
            .into_iter()
            .map(|q| Question {
                id: self.next_question_id.fetch_add(1, Ordering::Relaxed),
                text: q.text,
                options: q.options,
                correct_option: q.correct_option,
                subject: q.subject,
                explanation: q.explanation,
            })
            .collect();
        let exam = Exam {
            id: self.next_exam_id.fetch_add(1, Ordering::Relaxed),
            title: new.title,
            description: new.description,
            subjects: new.subjects,
            duration_secs: new.duration_secs,
            questions,
            created_at: Utc::now(),
        };
        self.exams.write().unwrap().push(exam.clone());
        exam
    }
}

/// Static plan catalog; loaded once at construction.
pub struct MemoryPlanRepo {
    plans: Vec<Plan>,
}

impl MemoryPlanRepo {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self { plans }
    }
}

#[async_trait]
impl PlanRepo for MemoryPlanRepo {
    async fn list(&self) -> Vec<Plan> {
        self.plans.clone()
    }

    async fn find(&self, id: &str) -> Option<Plan> {
        self.plans.iter().find(|p| p.id == id).cloned()
    }
}

pub struct MemorySubscriptionRepo {
    subscriptions: RwLock<Vec<Subscription>>,
    next_id: AtomicI64,
}

impl MemorySubscriptionRepo {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemorySubscriptionRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionRepo for MemorySubscriptionRepo {
    async fn find_by_user(&self, user_id: i64) -> Option<Subscription> {
        self.subscriptions
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .max_by_key(|s| s.id)
            .cloned()
    }

    async fn find_active_by_user(&self, user_id: i64) -> Option<Subscription> {
        self.subscriptions
            .read()
            .unwrap()
            .iter()
            .find(|s| s.user_id == user_id && s.status == STATUS_ACTIVE)
            .cloned()
    }

    async fn create(&self, new: NewSubscription) -> Subscription {
        let subscription = Subscription {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            user_id: new.user_id,
            plan_id: new.plan_id,
            status: new.status,
            start_date: new.start_date,
            end_date: new.end_date,
            amount_paid: new.amount_paid,
            payment_method: new.payment_method,
        };
        self.subscriptions.write().unwrap().push(subscription.clone());
        subscription
    }

    async fn cancel_active(&self, user_id: i64) -> Option<Subscription> {
        let mut subscriptions = self.subscriptions.write().unwrap();
        let subscription = subscriptions
            .iter_mut()
            .find(|s| s.user_id == user_id && s.status == STATUS_ACTIVE)?;
        subscription.status = STATUS_CANCELED.to_string();
        Some(subscription.clone())
    }
}

pub struct MemoryResultRepo {
    records: RwLock<Vec<ResultRecord>>,
    next_id: AtomicI64,
}

impl MemoryResultRepo {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryResultRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultRepo for MemoryResultRepo {
    async fn create(&self, new: NewResultRecord) -> ResultRecord {
        let record = ResultRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            user_id: new.user_id,
            exam_id: new.result.exam_id,
            exam_title: new.result.title.clone(),
            total_questions: new.result.total_questions,
            correct_count: new.result.correct_count,
            percentage: new.result.percentage,
            time_spent_secs: new.result.time_spent_secs,
            taken_at: new.taken_at,
            breakdown: new.result.breakdown,
        };
        self.records.write().unwrap().push(record.clone());
        record
    }

    async fn list_by_user(&self, user_id: i64) -> Vec<ResultRecord> {
        self.records
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }
}
