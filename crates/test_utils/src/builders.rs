//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{DateTime, Duration, Utc};

use domain_policy::{Coverage, Person, Policy, PolicyStatus, PolicyType, Premium};

use crate::fixtures::{PersonFixtures, TemporalFixtures, TermsFixtures};

/// Builder for constructing test policies
pub struct TestPolicyBuilder {
    policy_number: String,
    policy_type: PolicyType,
    status: PolicyStatus,
    created_at: Option<DateTime<Utc>>,
    effective_date: DateTime<Utc>,
    expiration_date: DateTime<Utc>,
    policyholder: Person,
    coverages: Vec<Coverage>,
    premium: Option<Premium>,
    notes: Option<String>,
}

impl Default for TestPolicyBuilder {
    fn default() -> Self {
        Self::new("POL-TEST-0001")
    }
}

impl TestPolicyBuilder {
    /// Creates a builder for an active AUTO policy with one year of cover,
    /// a monthly premium and a collision coverage
    pub fn new(policy_number: impl Into<String>) -> Self {
        let policy_number = policy_number.into();
        Self {
            policyholder: PersonFixtures::holder(format!("ID-{policy_number}")),
            policy_number,
            policy_type: PolicyType::Auto,
            status: PolicyStatus::Active,
            created_at: None,
            effective_date: TemporalFixtures::policy_start(),
            expiration_date: TemporalFixtures::policy_end(),
            coverages: vec![TermsFixtures::collision()],
            premium: Some(TermsFixtures::monthly_premium()),
            notes: None,
        }
    }

    pub fn of_type(mut self, policy_type: PolicyType) -> Self {
        self.policy_type = policy_type;
        self
    }

    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.status = status;
        self
    }

    /// Pins the creation timestamp, which drives listing order
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the effective date, keeping the cover length at one year
    pub fn effective_from(mut self, date: DateTime<Utc>) -> Self {
        self.effective_date = date;
        self.expiration_date = date + Duration::days(366);
        self
    }

    pub fn expiring_at(mut self, date: DateTime<Utc>) -> Self {
        self.expiration_date = date;
        self
    }

    pub fn held_by(mut self, policyholder: Person) -> Self {
        self.policyholder = policyholder;
        self
    }

    pub fn with_coverages(mut self, coverages: Vec<Coverage>) -> Self {
        self.coverages = coverages;
        self
    }

    pub fn with_premium(mut self, premium: Option<Premium>) -> Self {
        self.premium = premium;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builds the policy
    pub fn build(self) -> Policy {
        let mut policy = Policy::new(
            self.policy_number,
            self.policy_type,
            self.effective_date,
            self.expiration_date,
            self.policyholder,
        )
        .with_status(self.status);
        if let Some(created_at) = self.created_at {
            policy.created_at = created_at;
        }
        policy.coverages = self.coverages;
        policy.premium = self.premium;
        policy.notes = self.notes;
        policy
    }
}
