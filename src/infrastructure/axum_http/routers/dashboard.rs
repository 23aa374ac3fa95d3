use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::auth::AuthUser;
use crate::domain::repositories::{
    orders::OrderRepository, profile_views::ProfileViewRepository,
};
use crate::domain::value_objects::metrics::MetricsPeriodQuery;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{orders::OrderPostgres, profile_views::ProfileViewPostgres},
};
use crate::usecases::dashboard::DashboardMetricsUseCase;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let profile_view_repository = ProfileViewPostgres::new(Arc::clone(&db_pool));
    let dashboard_usecase = DashboardMetricsUseCase::new(
        Arc::new(order_repository),
        Arc::new(profile_view_repository),
    );

    Router::new()
        .route("/metrics", get(period_metrics))
        .with_state(Arc::new(dashboard_usecase))
}

pub async fn period_metrics<O, V>(
    State(dashboard_usecase): State<Arc<DashboardMetricsUseCase<O, V>>>,
    auth: AuthUser,
    Query(query): Query<MetricsPeriodQuery>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    V: ProfileViewRepository + Send + Sync + 'static,
{
    if auth.role != "admin" {
        return (StatusCode::FORBIDDEN, "Admin access required").into_response();
    }

    match dashboard_usecase
        .period_metrics(query.period_start, query.period_end)
        .await
    {
        Ok(metrics) => (StatusCode::OK, Json(metrics)).into_response(),
        Err(err) => (err.status_code(), err.to_string()).into_response(),
    }
}
