use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use crate::auth::AuthUser;
use crate::domain::repositories::{
    orders::OrderRepository, plans::PlanRepository, subscriptions::SubscriptionRepository,
};
use crate::domain::value_objects::subscriptions::SubscribeRequest;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        orders::OrderPostgres, plans::PlanPostgres, subscriptions::SubscriptionPostgres,
    },
};
use crate::usecases::subscriptions::SubscriptionUseCase;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let subscription_usecase = SubscriptionUseCase::new(
        Arc::new(plan_repository),
        Arc::new(subscription_repository),
        Arc::new(order_repository),
    );

    Router::new()
        .route("/plans", get(list_plans))
        .route("/current", get(current_subscription))
        .route("/subscribe", post(subscribe))
        .route("/cancel", post(cancel))
        .with_state(Arc::new(subscription_usecase))
}

/// Public: the pricing page reads this without a session.
pub async fn list_plans<P, S, O>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<P, S, O>>>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    match subscription_usecase.list_plans().await {
        Ok(plans) => (StatusCode::OK, Json(plans)).into_response(),
        Err(err) => (err.status_code(), err.to_string()).into_response(),
    }
}

pub async fn current_subscription<P, S, O>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<P, S, O>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    match subscription_usecase
        .current_subscription(auth.user_id, Utc::now())
        .await
    {
        Ok(Some(current)) => (StatusCode::OK, Json(current)).into_response(),
        Ok(None) => (StatusCode::NO_CONTENT, ()).into_response(),
        Err(err) => (err.status_code(), err.to_string()).into_response(),
    }
}

pub async fn subscribe<P, S, O>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<P, S, O>>>,
    auth: AuthUser,
    Json(request): Json<SubscribeRequest>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    match subscription_usecase
        .subscribe(auth.user_id, request, Utc::now())
        .await
    {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(err) => (err.status_code(), err.to_string()).into_response(),
    }
}

pub async fn cancel<P, S, O>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<P, S, O>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    match subscription_usecase.cancel(auth.user_id, Utc::now()).await {
        Ok(()) => (StatusCode::OK, "Subscription canceled").into_response(),
        Err(err) => (err.status_code(), err.to_string()).into_response(),
    }
}
