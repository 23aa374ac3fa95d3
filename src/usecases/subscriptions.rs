use std::sync::Arc;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::{orders::InsertOrderEntity, subscriptions::InsertSubscriptionEntity},
    repositories::{
        orders::OrderRepository, plans::PlanRepository, subscriptions::SubscriptionRepository,
    },
    value_objects::{
        enums::{
            payment_methods::PaymentMethod, payment_statuses::PaymentStatus,
            subscription_statuses::SubscriptionStatus,
        },
        subscriptions::{CurrentSubscriptionDto, PlanDto, SubscribeRequest, SubscribeResponse},
    },
};
use crate::usecases::{
    lifecycle,
    plan_resolver::{self, PlanResolverError},
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("plan is not open for new subscriptions")]
    PlanInactive,
    #[error("unsupported payment method: {0}")]
    UnsupportedPaymentMethod(String),
    #[error("an active subscription already exists")]
    AlreadySubscribed,
    #[error("no active subscription")]
    SubscriptionNotFound,
    #[error(transparent)]
    Pricing(#[from] PlanResolverError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::PlanNotFound | SubscriptionError::SubscriptionNotFound => {
                StatusCode::NOT_FOUND
            }
            SubscriptionError::PlanInactive | SubscriptionError::UnsupportedPaymentMethod(_) => {
                StatusCode::BAD_REQUEST
            }
            SubscriptionError::AlreadySubscribed => StatusCode::CONFLICT,
            SubscriptionError::Pricing(_) | SubscriptionError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<P, S, O>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    subscription_repo: Arc<S>,
    order_repo: Arc<O>,
}

impl<P, S, O> SubscriptionUseCase<P, S, O>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>, subscription_repo: Arc<S>, order_repo: Arc<O>) -> Self {
        Self {
            plan_repo,
            subscription_repo,
            order_repo,
        }
    }

    pub async fn list_plans(&self) -> UseCaseResult<Vec<PlanDto>> {
        info!("subscriptions: listing active plans");
        let plans = self.plan_repo.list_active_plans().await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to list active plans");
            SubscriptionError::Internal(err)
        })?;

        let mut dtos = Vec::with_capacity(plans.len());
        for plan in plans {
            let charge = plan_resolver::effective_charge(&plan).map_err(|err| {
                error!(
                    plan_id = %plan.id,
                    error = %err,
                    "subscriptions: plan with unusable price"
                );
                err
            })?;
            dtos.push(PlanDto::from_entity(plan, charge));
        }

        info!(plan_count = dtos.len(), "subscriptions: active plans loaded");
        Ok(dtos)
    }

    pub async fn current_subscription(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> UseCaseResult<Option<CurrentSubscriptionDto>> {
        info!(%user_id, "subscriptions: loading current subscription");

        let subscription = match self
            .subscription_repo
            .find_latest_for_user(user_id)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    db_error = ?err,
                    "subscriptions: failed to load current subscription"
                );
                SubscriptionError::Internal(err)
            })? {
            Some(subscription) => subscription,
            None => {
                info!(%user_id, "subscriptions: user has no subscription");
                return Ok(None);
            }
        };

        let plan = self
            .plan_repo
            .find_by_id(subscription.plan_id)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    plan_id = %subscription.plan_id,
                    db_error = ?err,
                    "subscriptions: failed to load plan for subscription"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                error!(
                    %user_id,
                    plan_id = %subscription.plan_id,
                    "subscriptions: subscription references a missing plan"
                );
                SubscriptionError::Internal(anyhow!("subscription references a missing plan"))
            })?;

        let remaining = lifecycle::classify(&subscription, now);
        let label = lifecycle::describe_remaining(subscription.ends_at, now);

        Ok(Some(CurrentSubscriptionDto {
            subscription_id: subscription.id,
            plan_id: plan.id,
            plan_name: plan.name,
            starts_at: subscription.starts_at,
            ends_at: subscription.ends_at,
            canceled_at: subscription.canceled_at,
            auto_renew: subscription.auto_renew,
            features: plan.features,
            remaining,
            label,
        }))
    }

    pub async fn subscribe(
        &self,
        user_id: Uuid,
        request: SubscribeRequest,
        now: DateTime<Utc>,
    ) -> UseCaseResult<SubscribeResponse> {
        info!(
            %user_id,
            plan_id = %request.plan_id,
            payment_method = %request.payment_method,
            auto_renew = request.auto_renew,
            "subscriptions: subscribe requested"
        );

        let payment_method =
            PaymentMethod::from_str(&request.payment_method).ok_or_else(|| {
                let err = SubscriptionError::UnsupportedPaymentMethod(request.payment_method.clone());
                warn!(
                    %user_id,
                    status = err.status_code().as_u16(),
                    payment_method = %request.payment_method,
                    "subscriptions: unsupported payment method"
                );
                err
            })?;

        let plan = self
            .plan_repo
            .find_by_id(request.plan_id)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    plan_id = %request.plan_id,
                    db_error = ?err,
                    "subscriptions: failed to load plan for subscribe"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = SubscriptionError::PlanNotFound;
                warn!(
                    %user_id,
                    plan_id = %request.plan_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: plan not found"
                );
                err
            })?;

        if !plan.is_active {
            let err = SubscriptionError::PlanInactive;
            warn!(
                %user_id,
                plan_id = %plan.id,
                status = err.status_code().as_u16(),
                "subscriptions: plan is deactivated"
            );
            return Err(err);
        }

        if let Some(existing) = self
            .subscription_repo
            .find_current_active(user_id, now)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    db_error = ?err,
                    "subscriptions: failed to check current subscription"
                );
                SubscriptionError::Internal(err)
            })?
        {
            let err = SubscriptionError::AlreadySubscribed;
            warn!(
                %user_id,
                subscription_id = %existing.id,
                status = err.status_code().as_u16(),
                "subscriptions: subscription already active"
            );
            return Err(err);
        }

        let amount = plan_resolver::effective_charge(&plan).map_err(|err| {
            error!(
                %user_id,
                plan_id = %plan.id,
                error = %err,
                "subscriptions: plan with unusable price"
            );
            err
        })?;
        let ends_at = plan_resolver::end_date_from(now, plan.duration_days)?;

        let subscription_id = self
            .subscription_repo
            .subscribe(InsertSubscriptionEntity {
                user_id,
                plan_id: plan.id,
                starts_at: now,
                ends_at: Some(ends_at),
                auto_renew: request.auto_renew,
                status: SubscriptionStatus::Pending.to_string(),
            })
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    plan_id = %plan.id,
                    db_error = ?err,
                    "subscriptions: failed to insert subscription"
                );
                SubscriptionError::Internal(err)
            })?;

        let order_id = self
            .order_repo
            .create(InsertOrderEntity {
                user_id,
                plan_id: plan.id,
                subscription_id,
                amount: Some(amount),
                payment_method: payment_method.to_string(),
                payment_status: PaymentStatus::Pending.to_string(),
            })
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    %subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to create order for subscription"
                );
                SubscriptionError::Internal(err)
            })?;

        info!(
            %user_id,
            %subscription_id,
            %order_id,
            %amount,
            "subscriptions: subscription created, awaiting payment"
        );

        Ok(SubscribeResponse {
            subscription_id,
            order_id,
            amount,
            starts_at: now,
            ends_at,
        })
    }

    pub async fn cancel(&self, user_id: Uuid, now: DateTime<Utc>) -> UseCaseResult<()> {
        let subscription = self
            .subscription_repo
            .find_current_active(user_id, now)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    db_error = ?err,
                    "subscriptions: failed to load subscription for cancel"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = SubscriptionError::SubscriptionNotFound;
                warn!(
                    %user_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: no active subscription to cancel"
                );
                err
            })?;

        self.subscription_repo
            .cancel(subscription.id, now)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    subscription_id = %subscription.id,
                    db_error = ?err,
                    "subscriptions: failed to mark subscription canceled"
                );
                SubscriptionError::Internal(err)
            })?;

        info!(
            %user_id,
            subscription_id = %subscription.id,
            "subscriptions: subscription canceled"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{plans::PlanEntity, subscriptions::SubscriptionEntity};
    use crate::domain::repositories::{
        orders::MockOrderRepository, plans::MockPlanRepository,
        subscriptions::MockSubscriptionRepository,
    };
    use chrono::TimeZone;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn utc(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 0, 0, 0).unwrap()
    }

    fn sample_plan(id: Uuid, discount_price: Option<Decimal>) -> PlanEntity {
        PlanEntity {
            id,
            name: "Tappy Pro".to_string(),
            description: Some("Full profile customization".to_string()),
            price: Decimal::new(9990, 2),
            discount_price,
            duration_days: 30,
            features: vec!["custom-qr".to_string()],
            is_popular: true,
            is_active: true,
            created_at: utc(2024, 1, 1),
        }
    }

    fn sample_subscription(user_id: Uuid, plan_id: Uuid) -> SubscriptionEntity {
        let starts_at = utc(2024, 1, 1);
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id,
            plan_id,
            starts_at,
            ends_at: Some(utc(2024, 1, 31)),
            canceled_at: None,
            auto_renew: true,
            status: "ATIVA".to_string(),
            created_at: starts_at,
        }
    }

    #[tokio::test]
    async fn list_plans_carries_effective_charge() {
        let mut plan_repo = MockPlanRepository::new();
        let subscription_repo = MockSubscriptionRepository::new();
        let order_repo = MockOrderRepository::new();

        let discounted = sample_plan(Uuid::new_v4(), Some(Decimal::new(8990, 2)));
        let full_price = sample_plan(Uuid::new_v4(), None);
        let plans = vec![discounted, full_price];

        plan_repo.expect_list_active_plans().returning(move || {
            let plans = plans.clone();
            Box::pin(async move { Ok(plans) })
        });

        let usecase = SubscriptionUseCase::new(
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
            Arc::new(order_repo),
        );

        let dtos = usecase.list_plans().await.unwrap();

        assert_eq!(dtos.len(), 2);
        assert_eq!(dtos[0].effective_charge, Decimal::new(8990, 2));
        assert_eq!(dtos[1].effective_charge, Decimal::new(9990, 2));
    }

    #[tokio::test]
    async fn list_plans_surfaces_corrupt_pricing() {
        let mut plan_repo = MockPlanRepository::new();
        let subscription_repo = MockSubscriptionRepository::new();
        let order_repo = MockOrderRepository::new();

        let mut corrupt = sample_plan(Uuid::new_v4(), None);
        corrupt.price = Decimal::ZERO;
        let plans = vec![corrupt];

        plan_repo.expect_list_active_plans().returning(move || {
            let plans = plans.clone();
            Box::pin(async move { Ok(plans) })
        });

        let usecase = SubscriptionUseCase::new(
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
            Arc::new(order_repo),
        );

        let err = usecase.list_plans().await.unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn current_subscription_attaches_classification() {
        let user_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let order_repo = MockOrderRepository::new();

        let subscription = sample_subscription(user_id, plan_id);
        let plan = sample_plan(plan_id, None);

        subscription_repo
            .expect_find_latest_for_user()
            .with(eq(user_id))
            .returning(move |_| {
                let subscription = subscription.clone();
                Box::pin(async move { Ok(Some(subscription)) })
            });
        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(Some(plan)) })
            });

        let usecase = SubscriptionUseCase::new(
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
            Arc::new(order_repo),
        );

        // Ten days into a thirty-day window.
        let dto = usecase
            .current_subscription(user_id, utc(2024, 1, 11))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dto.plan_name, "Tappy Pro");
        assert_eq!(dto.remaining.status, SubscriptionStatus::Active);
        assert_eq!(dto.remaining.days, 20);
        assert_eq!(dto.remaining.percent, 67);
        assert_eq!(dto.label.text, "20 day(s) remaining");
    }

    #[tokio::test]
    async fn current_subscription_none_when_never_subscribed() {
        let user_id = Uuid::new_v4();

        let plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let order_repo = MockOrderRepository::new();

        subscription_repo
            .expect_find_latest_for_user()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = SubscriptionUseCase::new(
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
            Arc::new(order_repo),
        );

        let dto = usecase
            .current_subscription(user_id, utc(2024, 1, 1))
            .await
            .unwrap();

        assert!(dto.is_none());
    }

    #[tokio::test]
    async fn subscribe_creates_pending_subscription_and_order() {
        let user_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let subscription_id = Uuid::new_v4();
        let order_id = Uuid::new_v4();
        let now = utc(2024, 6, 1);

        let mut plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut order_repo = MockOrderRepository::new();

        let plan = sample_plan(plan_id, Some(Decimal::new(8990, 2)));

        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(Some(plan)) })
            });
        subscription_repo
            .expect_find_current_active()
            .with(eq(user_id), eq(now))
            .returning(|_, _| Box::pin(async { Ok(None) }));
        subscription_repo
            .expect_subscribe()
            .withf(move |insert| {
                insert.user_id == user_id
                    && insert.plan_id == plan_id
                    && insert.starts_at == Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
                    && insert.ends_at
                        == Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap())
                    && insert.auto_renew
                    && insert.status == "PENDENTE"
            })
            .returning(move |_| Box::pin(async move { Ok(subscription_id) }));
        order_repo
            .expect_create()
            .withf(move |insert| {
                insert.user_id == user_id
                    && insert.subscription_id == subscription_id
                    && insert.amount == Some(Decimal::new(8990, 2))
                    && insert.payment_method == "PIX"
                    && insert.payment_status == "PENDENTE"
            })
            .returning(move |_| Box::pin(async move { Ok(order_id) }));

        let usecase = SubscriptionUseCase::new(
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
            Arc::new(order_repo),
        );

        let request = SubscribeRequest {
            plan_id,
            payment_method: "PIX".to_string(),
            auto_renew: true,
        };
        let response = usecase.subscribe(user_id, request, now).await.unwrap();

        assert_eq!(response.subscription_id, subscription_id);
        assert_eq!(response.order_id, order_id);
        assert_eq!(response.amount, Decimal::new(8990, 2));
        assert_eq!(response.ends_at, utc(2024, 7, 1));
    }

    #[tokio::test]
    async fn subscribe_rejects_deactivated_plan() {
        let user_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        let subscription_repo = MockSubscriptionRepository::new();
        let order_repo = MockOrderRepository::new();

        let mut plan = sample_plan(plan_id, None);
        plan.is_active = false;

        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(Some(plan)) })
            });

        let usecase = SubscriptionUseCase::new(
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
            Arc::new(order_repo),
        );

        let request = SubscribeRequest {
            plan_id,
            payment_method: "CARTAO".to_string(),
            auto_renew: false,
        };
        let err = usecase
            .subscribe(user_id, request, utc(2024, 6, 1))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn subscribe_conflicts_with_active_subscription() {
        let user_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let order_repo = MockOrderRepository::new();

        let plan = sample_plan(plan_id, None);
        let existing = sample_subscription(user_id, plan_id);

        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(Some(plan)) })
            });
        subscription_repo
            .expect_find_current_active()
            .returning(move |_, _| {
                let existing = existing.clone();
                Box::pin(async move { Ok(Some(existing)) })
            });

        let usecase = SubscriptionUseCase::new(
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
            Arc::new(order_repo),
        );

        let request = SubscribeRequest {
            plan_id,
            payment_method: "PIX".to_string(),
            auto_renew: false,
        };
        let err = usecase
            .subscribe(user_id, request, utc(2024, 1, 10))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn subscribe_rejects_unknown_payment_method() {
        let user_id = Uuid::new_v4();

        let plan_repo = MockPlanRepository::new();
        let subscription_repo = MockSubscriptionRepository::new();
        let order_repo = MockOrderRepository::new();

        let usecase = SubscriptionUseCase::new(
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
            Arc::new(order_repo),
        );

        let request = SubscribeRequest {
            plan_id: Uuid::new_v4(),
            payment_method: "CHEQUE".to_string(),
            auto_renew: false,
        };
        let err = usecase
            .subscribe(user_id, request, utc(2024, 1, 1))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn cancel_marks_current_subscription() {
        let user_id = Uuid::new_v4();
        let now = utc(2024, 1, 15);

        let plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let order_repo = MockOrderRepository::new();

        let subscription = sample_subscription(user_id, Uuid::new_v4());
        let subscription_id = subscription.id;

        subscription_repo
            .expect_find_current_active()
            .with(eq(user_id), eq(now))
            .returning(move |_, _| {
                let subscription = subscription.clone();
                Box::pin(async move { Ok(Some(subscription)) })
            });
        subscription_repo
            .expect_cancel()
            .with(eq(subscription_id), eq(now))
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let usecase = SubscriptionUseCase::new(
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
            Arc::new(order_repo),
        );

        usecase.cancel(user_id, now).await.unwrap();
    }

    #[tokio::test]
    async fn cancel_without_active_subscription_is_not_found() {
        let user_id = Uuid::new_v4();

        let plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        let order_repo = MockOrderRepository::new();

        subscription_repo
            .expect_find_current_active()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = SubscriptionUseCase::new(
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
            Arc::new(order_repo),
        );

        let err = usecase.cancel(user_id, utc(2024, 1, 1)).await.unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }
}
