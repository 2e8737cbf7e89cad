//! Policy filters and paging
//!
//! A [`PolicyFilter`] holds optional constraints. [`PolicyFilter::to_predicate`]
//! folds the present ones into a [`Conjunction`]; an absent constraint
//! contributes nothing and present ones are joined with AND. The same
//! conjunction is rendered to SQL by the storage adapter and evaluated in
//! memory by [`Conjunction::matches`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use core_kernel::TimestampRange;

use crate::enums::{PolicyStatus, PolicyType};
use crate::policy::Policy;

/// Page size used when the caller gives none or a non-positive one
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Optional constraints on a policy listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyFilter {
    /// Inclusive bounds on `effective_date`
    pub effective_date: TimestampRange,
    /// Inclusive bounds on `expiration_date`
    pub expiration_date: TimestampRange,
    /// Exact match on the policyholder's external identifier
    pub policyholder_id_number: Option<String>,
    /// Substring match on the policy number, case-sensitive
    pub policy_number: Option<String>,
    pub policy_type: Option<PolicyType>,
    pub policy_status: Option<PolicyStatus>,
}

impl PolicyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effective_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.effective_date = TimestampRange::new(from, to);
        self
    }

    pub fn expiring_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.expiration_date = TimestampRange::new(from, to);
        self
    }

    pub fn held_by(mut self, id_number: impl Into<String>) -> Self {
        self.policyholder_id_number = Some(id_number.into());
        self
    }

    pub fn number_containing(mut self, fragment: impl Into<String>) -> Self {
        self.policy_number = Some(fragment.into());
        self
    }

    pub fn of_type(mut self, policy_type: PolicyType) -> Self {
        self.policy_type = Some(policy_type);
        self
    }

    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.policy_status = Some(status);
        self
    }

    /// Folds the present constraints into one conjunction
    pub fn to_predicate(&self) -> Conjunction {
        Conjunction::fold([
            self.effective_date.from.map(PolicyPredicate::EffectiveOnOrAfter),
            self.effective_date.to.map(PolicyPredicate::EffectiveOnOrBefore),
            self.expiration_date.from.map(PolicyPredicate::ExpiresOnOrAfter),
            self.expiration_date.to.map(PolicyPredicate::ExpiresOnOrBefore),
            self.policyholder_id_number
                .clone()
                .map(PolicyPredicate::PolicyholderIdNumber),
            self.policy_number.clone().map(PolicyPredicate::PolicyNumberContains),
            self.policy_type.map(PolicyPredicate::TypeIs),
            self.policy_status.map(PolicyPredicate::StatusIs),
        ])
    }
}

/// A single constraint on a policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyPredicate {
    EffectiveOnOrAfter(DateTime<Utc>),
    EffectiveOnOrBefore(DateTime<Utc>),
    ExpiresOnOrAfter(DateTime<Utc>),
    ExpiresOnOrBefore(DateTime<Utc>),
    /// Some person holding the policy has this id number
    PolicyholderIdNumber(String),
    PolicyNumberContains(String),
    TypeIs(PolicyType),
    StatusIs(PolicyStatus),
}

impl PolicyPredicate {
    /// Evaluates the constraint against a policy
    pub fn matches(&self, policy: &Policy) -> bool {
        match self {
            PolicyPredicate::EffectiveOnOrAfter(at) => policy.effective_date >= *at,
            PolicyPredicate::EffectiveOnOrBefore(at) => policy.effective_date <= *at,
            PolicyPredicate::ExpiresOnOrAfter(at) => policy.expiration_date >= *at,
            PolicyPredicate::ExpiresOnOrBefore(at) => policy.expiration_date <= *at,
            PolicyPredicate::PolicyholderIdNumber(id_number) => {
                policy.policyholder.id_number == *id_number
            }
            PolicyPredicate::PolicyNumberContains(fragment) => {
                policy.policy_number.contains(fragment.as_str())
            }
            PolicyPredicate::TypeIs(policy_type) => policy.policy_type == *policy_type,
            PolicyPredicate::StatusIs(status) => policy.status == *status,
        }
    }
}

/// AND of zero or more predicates; the empty conjunction is always true
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conjunction {
    terms: Vec<PolicyPredicate>,
}

impl Conjunction {
    /// Keeps the present terms in order and drops the absent ones
    pub fn fold<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = Option<PolicyPredicate>>,
    {
        Self {
            terms: terms.into_iter().flatten().collect(),
        }
    }

    pub fn terms(&self) -> &[PolicyPredicate] {
        &self.terms
    }

    /// True when no constraint is present
    pub fn is_trivial(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, policy: &Policy) -> bool {
        self.terms.iter().all(|term| term.matches(policy))
    }
}

/// Caller-facing paging request, 1-based and unchecked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Clamps the request: `page <= 0` is the first page and
    /// `page_size <= 0` falls back to [`DEFAULT_PAGE_SIZE`]
    pub fn normalize(self) -> Pagination {
        let page = if self.page <= 0 { 1 } else { self.page };
        let size = if self.page_size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        };
        Pagination {
            index: page - 1,
            size,
        }
    }
}

/// Normalized paging: 0-based page index and positive size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    index: i64,
    size: i64,
}

impl Pagination {
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Rows per page, always positive
    pub fn limit(&self) -> i64 {
        self.size
    }

    /// Rows skipped before this page
    pub fn offset(&self) -> i64 {
        self.index.saturating_mul(self.size)
    }
}

/// One page of policies and the number of policies matching overall
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyPage {
    pub policies: Vec<Policy>,
    pub total_count: u64,
}

impl PolicyPage {
    pub fn new(policies: Vec<Policy>, total_count: u64) -> Self {
        Self {
            policies,
            total_count,
        }
    }

    /// The degraded result of a failed listing
    pub fn empty() -> Self {
        Self::default()
    }
}
