use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business metrics for one reporting window. Revenue and counts are
/// attributed by order creation date; refunds by the date the refund was
/// recorded. Rates are percentages over the window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PeriodMetrics {
    pub total_orders: i64,
    pub approved_orders: i64,
    pub refunded_orders: i64,
    pub total_revenue: Decimal,
    pub average_order_value: Decimal,
    pub conversion_rate: f64,
    pub refund_rate: f64,
    pub profile_views: i64,
}

/// Percentage change of each metric against the previous window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PeriodComparison {
    pub total_orders: f64,
    pub approved_orders: f64,
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub conversion_rate: f64,
    pub refund_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct MetricsPeriodQuery {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DashboardMetricsDto {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub current: PeriodMetrics,
    pub previous: PeriodMetrics,
    pub variance: PeriodComparison,
}
