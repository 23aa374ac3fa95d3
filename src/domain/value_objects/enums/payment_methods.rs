use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    CreditCard,
    Pix,
    Boleto,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CARTAO",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Boleto => "BOLETO",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "CARTAO" => Some(PaymentMethod::CreditCard),
            "PIX" => Some(PaymentMethod::Pix),
            "BOLETO" => Some(PaymentMethod::Boleto),
            _ => None,
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
