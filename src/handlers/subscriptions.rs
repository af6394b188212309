// src/handlers/subscriptions.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Months, Utc};
use serde_json::json;

use crate::{
    error::AppError,
    models::subscription::{CreateSubscriptionRequest, STATUS_ACTIVE},
    repo::{NewSubscription, Repos},
    utils::jwt::Claims,
};

/// Lists the plan catalog.
pub async fn list_plans(State(repos): State<Repos>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(repos.plans.list().await))
}

/// Retrieves a single plan.
pub async fn get_plan(
    State(repos): State<Repos>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let plan = repos
        .plans
        .find(&id)
        .await
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;

    Ok(Json(plan))
}

/// The caller's most recent subscription, with the plan embedded.
pub async fn my_subscription(
    State(repos): State<Repos>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let subscription = repos
        .subscriptions
        .find_by_user(claims.user_id())
        .await
        .ok_or_else(|| AppError::NotFound("Subscription not found".to_string()))?;

    let plan = repos
        .plans
        .find(&subscription.plan_id)
        .await
        .ok_or_else(|| {
            AppError::InternalServerError(format!(
                "Subscription {} references unknown plan '{}'",
                subscription.id, subscription.plan_id
            ))
        })?;

    Ok(Json(subscription.with_plan(plan)))
}

/// Subscribes the caller to a plan.
///
/// The end date is derived from the plan period (one, three or twelve
/// months). 404 for an unknown plan; 409 when an active subscription
/// already exists.
pub async fn create_subscription(
    State(repos): State<Repos>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateSubscriptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let plan = repos
        .plans
        .find(&payload.plan_id)
        .await
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;

    if repos
        .subscriptions
        .find_active_by_user(claims.user_id())
        .await
        .is_some()
    {
        return Err(AppError::Conflict(
            "User already has an active subscription".to_string(),
        ));
    }

    let start_date = Utc::now();
    let end_date = start_date
        .checked_add_months(Months::new(plan.period_months()))
        .unwrap_or(start_date);

    let subscription = repos
        .subscriptions
        .create(NewSubscription {
            user_id: claims.user_id(),
            plan_id: plan.id.clone(),
            status: STATUS_ACTIVE.to_string(),
            start_date,
            end_date,
            amount_paid: plan.price,
            payment_method: payload.payment_method,
        })
        .await;

    tracing::info!(
        user_id = claims.user_id(),
        plan = %plan.id,
        "subscription created"
    );

    Ok((StatusCode::CREATED, Json(subscription.with_plan(plan))))
}

/// Cancels the caller's active subscription.
pub async fn cancel_subscription(
    State(repos): State<Repos>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let subscription = repos
        .subscriptions
        .cancel_active(claims.user_id())
        .await
        .ok_or_else(|| AppError::NotFound("No active subscription".to_string()))?;

    Ok(Json(json!({
        "message": "Subscription canceled successfully",
        "subscription": subscription,
    })))
}
