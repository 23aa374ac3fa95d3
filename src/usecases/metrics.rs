use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

use crate::domain::entities::orders::OrderEntity;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;
use crate::domain::value_objects::metrics::{PeriodComparison, PeriodMetrics};

fn in_range(at: DateTime<Utc>, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
    at >= from && at < to
}

/// Rolls a batch of orders up into one reporting window `[start, end)`.
///
/// Revenue and order counts are attributed to the window the order was
/// created in; refunds to the window the refund was recorded in. Orders
/// without an amount are left out of the money figures with a warning and
/// never fail the batch. `total_profile_views` comes from the caller.
pub fn aggregate(
    orders: &[OrderEntity],
    period_start: DateTime<Utc>,
    period_end: DateTime<Utc>,
    total_profile_views: i64,
) -> PeriodMetrics {
    let mut total_orders = 0i64;
    let mut approved_orders = 0i64;
    let mut refunded_orders = 0i64;
    let mut total_revenue = Decimal::ZERO;

    for order in orders {
        let payment_status = PaymentStatus::from_str(&order.payment_status);

        if in_range(order.created_at, period_start, period_end) {
            total_orders += 1;

            if payment_status == Some(PaymentStatus::Approved) {
                match order.amount {
                    Some(amount) => {
                        approved_orders += 1;
                        total_revenue += amount;
                    }
                    None => {
                        warn!(
                            order_id = %order.id,
                            "metrics: approved order without amount skipped"
                        );
                    }
                }
            }
        }

        if payment_status == Some(PaymentStatus::Refunded)
            && in_range(order.updated_at, period_start, period_end)
        {
            refunded_orders += 1;
        }
    }

    let average_order_value = if approved_orders == 0 {
        Decimal::ZERO
    } else {
        total_revenue / Decimal::from(approved_orders)
    };

    let conversion_rate = if total_profile_views == 0 {
        0.0
    } else {
        approved_orders as f64 / total_profile_views as f64 * 100.0
    };

    let refund_rate = if total_orders == 0 {
        0.0
    } else {
        refunded_orders as f64 / total_orders as f64 * 100.0
    };

    PeriodMetrics {
        total_orders,
        approved_orders,
        refunded_orders,
        total_revenue,
        average_order_value,
        conversion_rate,
        refund_rate,
        profile_views: total_profile_views,
    }
}

/// Percentage change from `previous` to `current`. A zero baseline reports
/// 100 when there is any activity now and 0 otherwise; month-over-month
/// comparisons must never blow up on a quiet prior month.
pub fn variance(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 { 100.0 } else { 0.0 }
    } else {
        (current - previous) / previous * 100.0
    }
}

pub fn compare_periods(current: &PeriodMetrics, previous: &PeriodMetrics) -> PeriodComparison {
    let revenue = |metrics: &PeriodMetrics| metrics.total_revenue.to_f64().unwrap_or(0.0);
    let order_value = |metrics: &PeriodMetrics| metrics.average_order_value.to_f64().unwrap_or(0.0);

    PeriodComparison {
        total_orders: variance(current.total_orders as f64, previous.total_orders as f64),
        approved_orders: variance(
            current.approved_orders as f64,
            previous.approved_orders as f64,
        ),
        total_revenue: variance(revenue(current), revenue(previous)),
        average_order_value: variance(order_value(current), order_value(previous)),
        conversion_rate: variance(current.conversion_rate, previous.conversion_rate),
        refund_rate: variance(current.refund_rate, previous.refund_rate),
    }
}
