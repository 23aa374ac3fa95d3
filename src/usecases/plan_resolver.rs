use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::plans::PlanEntity;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanResolverError {
    #[error("plan {0} has no usable price")]
    InvalidPlan(Uuid),
    #[error("subscription period falls outside the representable date range")]
    InvalidDate,
}

/// Amount actually charged for a plan: the discount price when one is set
/// and sane (positive, not above the list price), otherwise the list price.
/// A non-positive list price is upstream data corruption and is surfaced,
/// never silently defaulted.
pub fn effective_charge(plan: &PlanEntity) -> Result<Decimal, PlanResolverError> {
    if plan.price <= Decimal::ZERO {
        return Err(PlanResolverError::InvalidPlan(plan.id));
    }

    match plan.discount_price {
        Some(discount) if discount > Decimal::ZERO && discount <= plan.price => Ok(discount),
        _ => Ok(plan.price),
    }
}

/// End of the benefit window: `duration_days` fixed 24-hour days after
/// `starts_at`. Exact day arithmetic, never calendar-month arithmetic.
pub fn end_date_from(
    starts_at: DateTime<Utc>,
    duration_days: i32,
) -> Result<DateTime<Utc>, PlanResolverError> {
    starts_at
        .checked_add_signed(Duration::days(duration_days.into()))
        .ok_or(PlanResolverError::InvalidDate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_plan(price: Decimal, discount_price: Option<Decimal>) -> PlanEntity {
        PlanEntity {
            id: Uuid::new_v4(),
            name: "Tappy Pro".to_string(),
            description: None,
            price,
            discount_price,
            duration_days: 30,
            features: vec!["custom-qr".to_string(), "nfc".to_string()],
            is_popular: true,
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn discount_price_wins_when_present() {
        let plan = sample_plan(Decimal::new(9990, 2), Some(Decimal::new(8990, 2)));

        assert_eq!(effective_charge(&plan).unwrap(), Decimal::new(8990, 2));
    }

    #[test]
    fn list_price_when_no_discount() {
        let plan = sample_plan(Decimal::new(9990, 2), None);

        assert_eq!(effective_charge(&plan).unwrap(), Decimal::new(9990, 2));
    }

    #[test]
    fn bogus_discount_falls_back_to_list_price() {
        let above_list = sample_plan(Decimal::new(9990, 2), Some(Decimal::new(12000, 2)));
        assert_eq!(effective_charge(&above_list).unwrap(), Decimal::new(9990, 2));

        let non_positive = sample_plan(Decimal::new(9990, 2), Some(Decimal::ZERO));
        assert_eq!(
            effective_charge(&non_positive).unwrap(),
            Decimal::new(9990, 2)
        );
    }

    #[test]
    fn unusable_list_price_is_an_error() {
        let plan = sample_plan(Decimal::ZERO, Some(Decimal::new(8990, 2)));

        assert_eq!(
            effective_charge(&plan),
            Err(PlanResolverError::InvalidPlan(plan.id))
        );
    }

    #[test]
    fn end_date_is_exact_day_arithmetic() {
        let starts_at = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

        // 30 fixed days after Jan 31 lands on Mar 1, not the "same day next
        // month".
        assert_eq!(
            end_date_from(starts_at, 30).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn end_date_preserves_time_of_day() {
        let starts_at = Utc.with_ymd_and_hms(2024, 5, 10, 15, 45, 30).unwrap();

        assert_eq!(
            end_date_from(starts_at, 365).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 10, 15, 45, 30).unwrap()
        );
    }
}
