use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, prelude::*};

use crate::domain::repositories::profile_views::ProfileViewRepository;
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::profile_views};

pub struct ProfileViewPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ProfileViewPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ProfileViewRepository for ProfileViewPostgres {
    async fn count_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = profile_views::table
            .filter(profile_views::viewed_at.ge(from))
            .filter(profile_views::viewed_at.lt(to))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
