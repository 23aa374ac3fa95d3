pub mod payment_methods;
pub mod payment_statuses;
pub mod severity_levels;
pub mod subscription_statuses;
