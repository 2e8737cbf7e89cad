//! Premium value object
//!
//! The payment terms attached to a policy.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{PaymentFrequency, PaymentMethod};
use crate::error::PolicyError;

/// Payment terms of a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Premium {
    /// Amount per payment, strictly positive
    pub amount: Decimal,
    pub frequency: PaymentFrequency,
    pub method: PaymentMethod,
    #[serde(default)]
    pub next_payment_date: Option<NaiveDate>,
}

impl Premium {
    /// Creates a premium without a scheduled next payment
    pub fn new(amount: Decimal, frequency: PaymentFrequency, method: PaymentMethod) -> Self {
        Self {
            amount,
            frequency,
            method,
            next_payment_date: None,
        }
    }

    /// Sets the next payment date
    pub fn with_next_payment_date(mut self, date: NaiveDate) -> Self {
        self.next_payment_date = Some(date);
        self
    }

    /// Rejects zero and negative amounts
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.amount <= Decimal::ZERO {
            return Err(PolicyError::InvalidPremium(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}
