pub mod dashboard;
pub mod subscriptions;
