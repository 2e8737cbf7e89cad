//! Policy record
//!
//! A policy is created once and is read-only afterwards. It owns its premium
//! and coverages and references the person holding it.
//!
//! # Invariants
//!
//! - `policy_number` is non-blank and unique across stored policies
//! - `expiration_date` is strictly after `effective_date`
//! - A premium, when present, has a positive amount

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{PolicyId, ValidPeriod};

use crate::coverage::Coverage;
use crate::enums::{PolicyStatus, PolicyType};
use crate::error::PolicyError;
use crate::person::{require, Person};
use crate::premium::Premium;

/// An insurance policy with its policyholder, premium and coverages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Storage identifier; the public contract keys on `policy_number`
    pub id: PolicyId,
    pub policy_number: String,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    #[serde(default)]
    pub status: PolicyStatus,
    pub created_at: DateTime<Utc>,
    pub effective_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub policyholder: Person,
    #[serde(default)]
    pub coverages: Vec<Coverage>,
    #[serde(default)]
    pub premium: Option<Premium>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Policy {
    /// Creates a pending policy with a fresh id, stamped now
    pub fn new(
        policy_number: impl Into<String>,
        policy_type: PolicyType,
        effective_date: DateTime<Utc>,
        expiration_date: DateTime<Utc>,
        policyholder: Person,
    ) -> Self {
        Self {
            id: PolicyId::new_v7(),
            policy_number: policy_number.into(),
            policy_type,
            status: PolicyStatus::default(),
            created_at: Utc::now(),
            effective_date,
            expiration_date,
            policyholder,
            coverages: Vec::new(),
            premium: None,
            notes: None,
        }
    }

    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_premium(mut self, premium: Premium) -> Self {
        self.premium = Some(premium);
        self
    }

    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverages.push(coverage);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The period the policy is in force, end exclusive
    pub fn period(&self) -> Result<ValidPeriod, PolicyError> {
        Ok(ValidPeriod::bounded(self.effective_date, self.expiration_date)?)
    }

    /// Checks every invariant a policy must satisfy before it is stored
    pub fn validate(&self) -> Result<(), PolicyError> {
        require("policy_number", &self.policy_number)?;
        self.period()?;
        self.policyholder.validate()?;
        if let Some(premium) = &self.premium {
            premium.validate()?;
        }
        for coverage in &self.coverages {
            coverage.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::enums::{PaymentFrequency, PaymentMethod};
    use chrono::{Duration, NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    fn holder() -> Person {
        Person {
            id_number: "ID-1".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 14).unwrap(),
            email: "ana@example.com".to_string(),
            phone: "+1-555-0100".to_string(),
            address: Address::new("1 Main St", "Springfield", "12345", "US"),
        }
    }

    fn policy() -> Policy {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Policy::new("POL-1", PolicyType::Auto, start, start + Duration::days(365), holder())
    }

    #[test]
    fn test_valid_policy_passes() {
        let policy = policy().with_premium(Premium::new(
            dec!(120.50),
            PaymentFrequency::Monthly,
            PaymentMethod::CreditCard,
        ));
        assert!(policy.validate().is_ok());
        assert_eq!(policy.status, PolicyStatus::Pending);
    }

    #[test]
    fn test_equal_dates_rejected() {
        let mut policy = policy();
        policy.expiration_date = policy.effective_date;
        assert!(matches!(policy.validate(), Err(PolicyError::InvalidPeriod(_))));
    }

    #[test]
    fn test_blank_number_rejected() {
        let mut policy = policy();
        policy.policy_number = "  ".to_string();
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::MissingRequiredField(field)) if field == "policy_number"
        ));
    }

    #[test]
    fn test_period_spans_effective_to_expiration() {
        let policy = policy();
        let period = policy.period().unwrap();
        assert_eq!(period.start, policy.effective_date);
        assert_eq!(period.end, policy.expiration_date);
    }
}
