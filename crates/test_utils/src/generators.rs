//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating policies and filters that
//! keep the domain invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_policy::{
    Coverage, PaymentFrequency, PaymentMethod, Policy, PolicyFilter, PolicyStatus, PolicyType,
    Premium,
};

use crate::builders::TestPolicyBuilder;
use crate::fixtures::PersonFixtures;

/// Strategy for policy types
pub fn policy_type_strategy() -> impl Strategy<Value = PolicyType> {
    proptest::sample::select(PolicyType::ALL.to_vec())
}

/// Strategy for policy statuses
pub fn policy_status_strategy() -> impl Strategy<Value = PolicyStatus> {
    proptest::sample::select(PolicyStatus::ALL.to_vec())
}

/// Strategy for timestamps within 2020..2030, whole seconds
pub fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    (0i64..10 * 365 * 24 * 3600).prop_map(move |secs| base + Duration::seconds(secs))
}

/// Strategy for positive money amounts with up to two decimals
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for premiums
pub fn premium_strategy() -> impl Strategy<Value = Premium> {
    (
        positive_amount_strategy(),
        proptest::sample::select(PaymentFrequency::ALL.to_vec()),
        proptest::sample::select(PaymentMethod::ALL.to_vec()),
    )
        .prop_map(|(amount, frequency, method)| Premium::new(amount, frequency, method))
}

/// Strategy for coverages with non-negative deductibles and limits
pub fn coverage_strategy() -> impl Strategy<Value = Coverage> {
    (
        "[A-Z]{3,12}",
        "[a-z ]{0,40}",
        (0i64..1_000_000i64),
        proptest::option::of(0i64..100_000_000i64),
        proptest::collection::vec("[a-z]{3,10}", 0..3),
    )
        .prop_map(|(coverage_type, description, deductible, limit, exclusions)| Coverage {
            coverage_type,
            description,
            limit: limit.map(|cents| Decimal::new(cents, 2)),
            deductible: Decimal::new(deductible, 2),
            exclusions,
        })
}

/// Strategy for valid policies; numbers are `POL-` followed by `index`
/// and a random suffix, so callers can keep them unique
pub fn policy_strategy(index: usize) -> impl Strategy<Value = Policy> {
    (
        "[0-9]{6}",
        policy_type_strategy(),
        policy_status_strategy(),
        timestamp_strategy(),
        1i64..3650,
        "[0-9]{3}",
        proptest::collection::vec(coverage_strategy(), 0..3),
        proptest::option::of(premium_strategy()),
    )
        .prop_map(
            move |(suffix, policy_type, status, effective, days, holder, coverages, premium)| {
                TestPolicyBuilder::new(format!("POL-{index}-{suffix}"))
                    .of_type(policy_type)
                    .with_status(status)
                    .effective_from(effective)
                    .expiring_at(effective + Duration::days(days))
                    .held_by(PersonFixtures::holder(format!("ID-{holder}")))
                    .with_coverages(coverages)
                    .with_premium(premium)
                    .build()
            },
        )
}

/// Strategy for a small book of policies with distinct numbers
pub fn policy_book_strategy(max: usize) -> impl Strategy<Value = Vec<Policy>> {
    (0..=max).prop_flat_map(|len| (0..len).map(policy_strategy).collect::<Vec<_>>())
}

/// Strategy for filters; every field is independently present or absent
pub fn filter_strategy() -> impl Strategy<Value = PolicyFilter> {
    (
        proptest::option::of(timestamp_strategy()),
        proptest::option::of(timestamp_strategy()),
        proptest::option::of(timestamp_strategy()),
        proptest::option::of(timestamp_strategy()),
        proptest::option::of("ID-[0-9]{3}"),
        proptest::option::of("[0-9]{1,2}"),
        proptest::option::of(policy_type_strategy()),
        proptest::option::of(policy_status_strategy()),
    )
        .prop_map(
            |(eff_from, eff_to, exp_from, exp_to, holder, number, policy_type, status)| {
                let mut filter = PolicyFilter::new()
                    .effective_between(eff_from, eff_to)
                    .expiring_between(exp_from, exp_to);
                filter.policyholder_id_number = holder;
                filter.policy_number = number;
                filter.policy_type = policy_type;
                filter.policy_status = status;
                filter
            },
        )
}
