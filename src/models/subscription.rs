// src/models/subscription.rs

use serde::{Deserialize, Serialize};

pub const STATUS_ACTIVE: &str = "ativa";
pub const STATUS_CANCELED: &str = "cancelada";

/// A subscription plan from the static catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// Slug identifier: 'mensal', 'trimestral' or 'anual'.
    pub id: String,
    pub title: String,
    /// Price in whole BRL.
    pub price: u32,
    /// Billing period slug, same vocabulary as `id`.
    pub period: String,
    pub description: String,
    pub features: Vec<String>,
    pub recommended: bool,
}

impl Plan {
    /// Number of months one billing period covers.
    pub fn period_months(&self) -> u32 {
        match self.period.as_str() {
            "anual" => 12,
            "trimestral" => 3,
            _ => 1,
        }
    }
}

/// A user's subscription to a plan.
#[derive(Debug, Clone, Serialize)]
pub struct Subscription {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: String,
    /// 'ativa' or 'cancelada'.
    pub status: String,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub amount_paid: u32,
    pub payment_method: String,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    /// Response shape with the plan details embedded.
    pub fn with_plan(self, plan: Plan) -> SubscriptionResponse {
        SubscriptionResponse {
            subscription: self,
            plan,
        }
    }
}

/// DTO embedding the plan next to the subscription.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub plan: Plan,
}

/// DTO for subscribing to a plan. The user comes from the JWT claims.
#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub plan_id: String,
    pub payment_method: String,
}
