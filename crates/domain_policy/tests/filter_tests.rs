//! Tests for policy filters and page normalization
//!
//! Property tests check that dropping a constraint never shrinks the set of
//! matching policies.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use domain_policy::{
    Address, PageRequest, Person, Policy, PolicyFilter, PolicyStatus, PolicyType,
    DEFAULT_PAGE_SIZE,
};
use core_kernel::TimestampRange;
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn policy(number: &str, policy_type: PolicyType, id_number: &str, offset_days: i64) -> Policy {
    let holder = Person {
        id_number: id_number.to_string(),
        first_name: "Jane".to_string(),
        last_name: "Roe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        email: "jane@example.com".to_string(),
        phone: "555-0000".to_string(),
        address: Address::new("1 Side St", "Shelbyville", "10001", "USA"),
    };
    let start = base() + Duration::days(offset_days);
    Policy::new(number, policy_type, start, start + Duration::days(180), holder)
}

mod predicate {
    use super::*;

    #[test]
    fn test_date_bounds_are_inclusive() {
        let p = policy("POL-1", PolicyType::Auto, "A", 10);
        let exact = PolicyFilter::new()
            .effective_between(Some(p.effective_date), Some(p.effective_date))
            .to_predicate();
        assert!(exact.matches(&p));

        let after = PolicyFilter::new()
            .effective_between(Some(p.effective_date + Duration::seconds(1)), None)
            .to_predicate();
        assert!(!after.matches(&p));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let p = policy("POL-1", PolicyType::Auto, "A", 10);
        let inverted = PolicyFilter::new()
            .expiring_between(Some(p.expiration_date), Some(p.effective_date))
            .to_predicate();
        assert!(!inverted.matches(&p));
    }

    #[test]
    fn test_date_fields_are_independent() {
        let p = policy("POL-1", PolicyType::Auto, "A", 0);
        let filter = PolicyFilter::new()
            .effective_between(None, Some(p.effective_date))
            .expiring_between(Some(p.expiration_date), None);
        assert!(filter.to_predicate().matches(&p));

        let filter = filter.expiring_between(None, Some(p.effective_date));
        assert!(!filter.to_predicate().matches(&p));
    }

    #[test]
    fn test_policy_number_is_case_sensitive_substring() {
        let p = policy("POL-2024-AB", PolicyType::Life, "A", 0);
        assert!(PolicyFilter::new().number_containing("2024").to_predicate().matches(&p));
        assert!(PolicyFilter::new().number_containing("-AB").to_predicate().matches(&p));
        assert!(!PolicyFilter::new().number_containing("ab").to_predicate().matches(&p));
    }

    #[test]
    fn test_policyholder_id_number_is_exact() {
        let p = policy("POL-1", PolicyType::Life, "ID-77", 0);
        assert!(PolicyFilter::new().held_by("ID-77").to_predicate().matches(&p));
        assert!(!PolicyFilter::new().held_by("ID-7").to_predicate().matches(&p));
    }

    #[test]
    fn test_enum_filters_are_exact() {
        let p = policy("POL-1", PolicyType::Travel, "A", 0).with_status(PolicyStatus::Lapsed);
        assert!(PolicyFilter::new()
            .of_type(PolicyType::Travel)
            .with_status(PolicyStatus::Lapsed)
            .to_predicate()
            .matches(&p));
        assert!(!PolicyFilter::new()
            .of_type(PolicyType::Travel)
            .with_status(PolicyStatus::Active)
            .to_predicate()
            .matches(&p));
    }

    #[test]
    fn test_present_filters_are_counted() {
        let filter = PolicyFilter::new()
            .effective_between(Some(base()), Some(base()))
            .held_by("X")
            .of_type(PolicyType::Auto);
        assert_eq!(filter.to_predicate().terms().len(), 4);
    }
}

mod paging {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_non_positive_page_is_first_page() {
        for page in [0, -1, i64::MIN] {
            assert_eq!(
                PageRequest::new(page, 7).normalize(),
                PageRequest::new(1, 7).normalize()
            );
        }
    }

    #[test]
    fn test_non_positive_size_is_default() {
        for size in [0, -5] {
            assert_eq!(
                PageRequest::new(2, size).normalize(),
                PageRequest::new(2, DEFAULT_PAGE_SIZE).normalize()
            );
        }
    }
}

fn arb_type() -> impl Strategy<Value = PolicyType> {
    prop::sample::select(PolicyType::ALL.to_vec())
}

fn arb_status() -> impl Strategy<Value = PolicyStatus> {
    prop::sample::select(PolicyStatus::ALL.to_vec())
}

prop_compose! {
    fn arb_policy()(
        policy_type in arb_type(),
        status in arb_status(),
        serial in 0u32..50,
        id_number in prop::sample::select(vec!["A", "B", "C"]),
        offset_days in 0i64..400,
    ) -> Policy {
        policy(&format!("POL-{serial:03}"), policy_type, id_number, offset_days)
            .with_status(status)
    }
}

prop_compose! {
    fn arb_filter()(
        effective_from in prop::option::of(0i64..400),
        effective_to in prop::option::of(0i64..400),
        expiration_from in prop::option::of(180i64..580),
        expiration_to in prop::option::of(180i64..580),
        id_number in prop::option::of(prop::sample::select(vec!["A", "B", "C"])),
        fragment in prop::option::of("[0-9]{1,2}"),
        policy_type in prop::option::of(arb_type()),
        status in prop::option::of(arb_status()),
    ) -> PolicyFilter {
        let day = |d: i64| base() + Duration::days(d);
        PolicyFilter {
            effective_date: TimestampRange::new(effective_from.map(day), effective_to.map(day)),
            expiration_date: TimestampRange::new(
                expiration_from.map(day),
                expiration_to.map(day),
            ),
            policyholder_id_number: id_number.map(str::to_string),
            policy_number: fragment,
            policy_type,
            policy_status: status,
        }
    }
}

/// Clears one filter field; every field has an index below `FIELD_COUNT`
fn drop_field(filter: &mut PolicyFilter, which: usize) {
    match which {
        0 => filter.effective_date.from = None,
        1 => filter.effective_date.to = None,
        2 => filter.expiration_date.from = None,
        3 => filter.expiration_date.to = None,
        4 => filter.policyholder_id_number = None,
        5 => filter.policy_number = None,
        6 => filter.policy_type = None,
        _ => filter.policy_status = None,
    }
}

const FIELD_COUNT: usize = 8;

proptest! {
    #[test]
    fn prop_dropping_a_constraint_relaxes(
        policies in prop::collection::vec(arb_policy(), 0..30),
        filter in arb_filter(),
        which in 0usize..FIELD_COUNT,
    ) {
        let mut relaxed = filter.clone();
        drop_field(&mut relaxed, which);
        let strict = filter.to_predicate();
        let loose = relaxed.to_predicate();
        for p in &policies {
            if strict.matches(p) {
                prop_assert!(
                    loose.matches(p),
                    "dropping field {} excluded {}",
                    which,
                    p.policy_number
                );
            }
        }
    }

    #[test]
    fn prop_dropping_every_field_matches_everything(
        policy in arb_policy(),
        filter in arb_filter(),
    ) {
        let mut relaxed = filter;
        for which in 0..FIELD_COUNT {
            drop_field(&mut relaxed, which);
        }
        prop_assert_eq!(&relaxed, &PolicyFilter::default());
        prop_assert!(relaxed.to_predicate().matches(&policy));
    }

    #[test]
    fn prop_empty_filter_matches_everything(policy in arb_policy()) {
        prop_assert!(PolicyFilter::new().to_predicate().matches(&policy));
    }

    #[test]
    fn prop_offset_is_page_times_size(page in 1i64..10_000, size in 1i64..1_000) {
        let pagination = PageRequest::new(page, size).normalize();
        prop_assert_eq!(pagination.offset(), (page - 1) * size);
        prop_assert_eq!(pagination.limit(), size);
    }
}
