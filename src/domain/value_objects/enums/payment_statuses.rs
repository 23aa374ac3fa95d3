use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Approved,
    Pending,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Approved => "APROVADO",
            PaymentStatus::Pending => "PENDENTE",
            PaymentStatus::Refunded => "REEMBOLSADO",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "APROVADO" => Some(PaymentStatus::Approved),
            "PENDENTE" => Some(PaymentStatus::Pending),
            "REEMBOLSADO" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
