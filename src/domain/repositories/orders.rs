use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::orders::{InsertOrderEntity, OrderEntity};

#[async_trait]
#[automock]
pub trait OrderRepository {
    async fn create(&self, insert_order: InsertOrderEntity) -> Result<Uuid>;

    /// Orders with `created_at` OR `updated_at` inside `[from, to)`. The
    /// aggregator re-partitions per timestamp, so the superset is loaded in
    /// one query.
    async fn list_touching_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<OrderEntity>>;
}
