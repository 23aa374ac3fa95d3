use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    /// Most recently created subscription for the user, whatever its stored
    /// status. Display classification happens at read time on top of this.
    async fn find_latest_for_user(&self, user_id: Uuid) -> Result<Option<SubscriptionEntity>>;

    /// Subscription currently granting benefits: status ATIVA or TRIAL and
    /// not past its end date at `now`.
    async fn find_current_active(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<SubscriptionEntity>>;

    async fn subscribe(&self, insert_subscription: InsertSubscriptionEntity) -> Result<Uuid>;

    async fn cancel(&self, subscription_id: Uuid, canceled_at: DateTime<Utc>) -> Result<()>;
}
