use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::repositories::{
    orders::OrderRepository, profile_views::ProfileViewRepository,
};
use crate::domain::value_objects::metrics::DashboardMetricsDto;
use crate::usecases::metrics;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("period start must come before period end")]
    InvalidPeriod,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl MetricsError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            MetricsError::InvalidPeriod => StatusCode::BAD_REQUEST,
            MetricsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct DashboardMetricsUseCase<O, V>
where
    O: OrderRepository + Send + Sync + 'static,
    V: ProfileViewRepository + Send + Sync + 'static,
{
    order_repo: Arc<O>,
    profile_view_repo: Arc<V>,
}

impl<O, V> DashboardMetricsUseCase<O, V>
where
    O: OrderRepository + Send + Sync + 'static,
    V: ProfileViewRepository + Send + Sync + 'static,
{
    pub fn new(order_repo: Arc<O>, profile_view_repo: Arc<V>) -> Self {
        Self {
            order_repo,
            profile_view_repo,
        }
    }

    /// Metrics for `[period_start, period_end)` next to the same figures for
    /// the equal-length window immediately before it, plus the variance
    /// between the two.
    pub async fn period_metrics(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<DashboardMetricsDto, MetricsError> {
        if period_start >= period_end {
            let err = MetricsError::InvalidPeriod;
            warn!(
                %period_start,
                %period_end,
                status = err.status_code().as_u16(),
                "dashboard: invalid reporting period"
            );
            return Err(err);
        }

        let previous_start = period_start - (period_end - period_start);

        info!(
            %period_start,
            %period_end,
            "dashboard: aggregating period metrics"
        );

        let orders = self
            .order_repo
            .list_touching_period(previous_start, period_end)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "dashboard: failed to load orders for period");
                MetricsError::Internal(err)
            })?;

        let current_views = self
            .profile_view_repo
            .count_between(period_start, period_end)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "dashboard: failed to count profile views");
                MetricsError::Internal(err)
            })?;
        let previous_views = self
            .profile_view_repo
            .count_between(previous_start, period_start)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "dashboard: failed to count prior profile views");
                MetricsError::Internal(err)
            })?;

        let current = metrics::aggregate(&orders, period_start, period_end, current_views);
        let previous = metrics::aggregate(&orders, previous_start, period_start, previous_views);
        let variance = metrics::compare_periods(&current, &previous);

        info!(
            total_orders = current.total_orders,
            approved_orders = current.approved_orders,
            refunded_orders = current.refunded_orders,
            "dashboard: period metrics computed"
        );

        Ok(DashboardMetricsDto {
            period_start,
            period_end,
            current,
            previous,
            variance,
        })
    }
}
