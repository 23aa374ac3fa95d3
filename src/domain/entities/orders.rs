use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::orders;

/// One billing event tied to a subscription. `amount` is captured at
/// checkout intent and never rewritten afterwards; `payment_date` and
/// `transaction_id` are set only once the payment is approved.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = orders)]
pub struct OrderEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub subscription_id: Uuid,
    pub amount: Option<Decimal>,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_date: Option<DateTime<Utc>>,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub struct InsertOrderEntity {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub subscription_id: Uuid,
    pub amount: Option<Decimal>,
    pub payment_method: String,
    pub payment_status: String,
}
