//! Custom Test Assertions
//!
//! Provides assertion helpers for policies that give more meaningful error
//! messages than comparing whole structs.

use domain_policy::{Policy, PolicyPage};

/// Asserts that a stored policy carries the same business content as the
/// one submitted
///
/// Ids and `created_at` are ignored; storage may assign its own.
///
/// # Panics
///
/// Panics naming the first field that differs
pub fn assert_same_policy(actual: &Policy, expected: &Policy) {
    assert_eq!(actual.policy_number, expected.policy_number, "policy_number differs");
    assert_eq!(
        actual.policy_type, expected.policy_type,
        "type differs for {}",
        expected.policy_number
    );
    assert_eq!(actual.status, expected.status, "status differs for {}", expected.policy_number);
    assert_eq!(
        actual.effective_date, expected.effective_date,
        "effective_date differs for {}",
        expected.policy_number
    );
    assert_eq!(
        actual.expiration_date, expected.expiration_date,
        "expiration_date differs for {}",
        expected.policy_number
    );
    assert_eq!(
        actual.policyholder, expected.policyholder,
        "policyholder differs for {}",
        expected.policy_number
    );
    assert_eq!(
        actual.coverages, expected.coverages,
        "coverages differ for {}",
        expected.policy_number
    );
    assert_eq!(actual.premium, expected.premium, "premium differs for {}", expected.policy_number);
    assert_eq!(actual.notes, expected.notes, "notes differ for {}", expected.policy_number);
}

/// Asserts that policies are ordered newest first
pub fn assert_newest_first(policies: &[Policy]) {
    for pair in policies.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "{} ({}) listed before newer {} ({})",
            pair[0].policy_number,
            pair[0].created_at,
            pair[1].policy_number,
            pair[1].created_at
        );
    }
}

/// Asserts a page's policy numbers, in order, and its total count
pub fn assert_page(page: &PolicyPage, expected_numbers: &[&str], expected_total: u64) {
    let numbers: Vec<&str> = page.policies.iter().map(|p| p.policy_number.as_str()).collect();
    assert_eq!(numbers, expected_numbers, "page contents differ");
    assert_eq!(page.total_count, expected_total, "total_count differs");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TestPolicyBuilder;
    use crate::fixtures::TemporalFixtures;
    use chrono::Duration;

    #[test]
    fn test_same_policy_ignores_identity() {
        let original = TestPolicyBuilder::new("P-1").build();
        let mut stored = TestPolicyBuilder::new("P-1").build();
        stored.created_at = original.created_at + Duration::seconds(5);

        assert_ne!(original.id, stored.id);
        assert_same_policy(&stored, &original);
    }

    #[test]
    #[should_panic(expected = "policyholder differs")]
    fn test_same_policy_reports_holder() {
        let original = TestPolicyBuilder::new("P-1").build();
        let mut stored = original.clone();
        stored.policyholder.first_name = "Other".to_string();

        assert_same_policy(&stored, &original);
    }

    #[test]
    #[should_panic(expected = "listed before newer")]
    fn test_newest_first_detects_inversion() {
        let start = TemporalFixtures::policy_start();
        let older = TestPolicyBuilder::new("P-1").created_at(start).build();
        let newer = TestPolicyBuilder::new("P-2")
            .created_at(start + Duration::minutes(1))
            .build();

        assert_newest_first(&[older, newer]);
    }
}
