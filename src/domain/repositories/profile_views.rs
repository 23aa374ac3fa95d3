use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;

#[async_trait]
#[automock]
pub trait ProfileViewRepository {
    async fn count_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<i64>;
}
