use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Stored status tokens are an external contract shared with the billing
/// provider and the dashboard; the wire strings below must not change.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Trial,
    #[default]
    Active,
    Pending,
    Canceled,
    Expired,
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trial => "TRIAL",
            SubscriptionStatus::Active => "ATIVA",
            SubscriptionStatus::Pending => "PENDENTE",
            SubscriptionStatus::Canceled => "CANCELADA",
            SubscriptionStatus::Expired => "EXPIRADA",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "TRIAL" => SubscriptionStatus::Trial,
            "ATIVA" => SubscriptionStatus::Active,
            "PENDENTE" => SubscriptionStatus::Pending,
            "CANCELADA" => SubscriptionStatus::Canceled,
            "EXPIRADA" => SubscriptionStatus::Expired,
            _ => SubscriptionStatus::Expired,
        }
    }
}
