pub mod dashboard;
pub mod lifecycle;
pub mod metrics;
pub mod plan_resolver;
pub mod subscriptions;
