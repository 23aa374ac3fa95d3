use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*};
use uuid::Uuid;

use crate::domain::entities::orders::{InsertOrderEntity, OrderEntity};
use crate::domain::repositories::orders::OrderRepository;
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::orders};

pub struct OrderPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OrderPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OrderRepository for OrderPostgres {
    async fn create(&self, insert_order: InsertOrderEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(orders::table)
            .values(&insert_order)
            .returning(orders::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn list_touching_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = orders::table
            .filter(
                orders::created_at
                    .ge(from)
                    .and(orders::created_at.lt(to))
                    .or(orders::updated_at.ge(from).and(orders::updated_at.lt(to))),
            )
            .select(OrderEntity::as_select())
            .load::<OrderEntity>(&mut conn)?;

        Ok(results)
    }
}
