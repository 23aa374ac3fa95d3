use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::plans;

/// Raw row as stored in Postgres. `features` stays JSONB here and is
/// decoded into a string list on the way out.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plans)]
pub struct PlanRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub duration_days: i32,
    pub features: serde_json::Value,
    pub is_popular: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub duration_days: i32,
    pub features: Vec<String>,
    pub is_popular: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PlanRow> for PlanEntity {
    fn from(row: PlanRow) -> Self {
        let features = serde_json::from_value(row.features).unwrap_or_default();

        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            discount_price: row.discount_price,
            duration_days: row.duration_days,
            features,
            is_popular: row.is_popular,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}
