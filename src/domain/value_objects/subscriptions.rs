use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::plans::PlanEntity;
use crate::domain::value_objects::enums::{
    severity_levels::SeverityLevel, subscription_statuses::SubscriptionStatus,
};

/// Structured remaining-time breakdown for one subscription, computed at
/// read time against a caller-supplied clock. `status` is the display
/// status; the stored column is never rewritten by classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemainingTime {
    pub status: SubscriptionStatus,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub percent: u8,
}

/// Human-readable remaining-time variant used in list and table displays.
/// `severity` is absent when the subscription has no expiration date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemainingLabel {
    pub text: String,
    pub severity: Option<SeverityLevel>,
}

#[derive(Debug, Serialize)]
pub struct PlanDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub effective_charge: Decimal,
    pub duration_days: i32,
    pub features: Vec<String>,
    pub is_popular: bool,
}

impl PlanDto {
    pub fn from_entity(plan: PlanEntity, effective_charge: Decimal) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            description: plan.description,
            price: plan.price,
            discount_price: plan.discount_price,
            effective_charge,
            duration_days: plan.duration_days,
            features: plan.features,
            is_popular: plan.is_popular,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CurrentSubscriptionDto {
    pub subscription_id: Uuid,
    pub plan_id: Uuid,
    pub plan_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub auto_renew: bool,
    pub features: Vec<String>,
    pub remaining: RemainingTime,
    pub label: RemainingLabel,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub plan_id: Uuid,
    pub payment_method: String,
    pub auto_renew: bool,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub subscription_id: Uuid,
    pub order_id: Uuid,
    pub amount: Decimal,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}
