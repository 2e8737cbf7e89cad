//! Policy Domain Ports
//!
//! This module defines the port through which the policy domain reaches its
//! record store. The PostgreSQL adapter lives in `infra_db`; an in-memory
//! adapter is available under the `mock` feature for tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_policy::ports::PolicyPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn PolicyPort> = Arc::new(PostgresPolicyAdapter::new(pool));
//! let page = port
//!     .get_policies_filtered_with_pagination(&PolicyFilter::new(), PageRequest::default())
//!     .await;
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::filter::{PageRequest, PolicyFilter, PolicyPage};
use crate::policy::Policy;

/// Record store operations for policies
///
/// Policies are only ever created and read. Listing operations return
/// policies newest first.
#[async_trait]
pub trait PolicyPort: DomainPort + HealthCheckable {
    /// Returns every stored policy
    async fn get_all_policies(&self) -> Result<Vec<Policy>, PortError>;

    /// Looks a policy up by its exact number
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no policy carries the number
    async fn get_single_policy_by_number(
        &self,
        policy_number: &str,
    ) -> Result<Option<Policy>, PortError>;

    /// Returns one page of the policies matching `filter`
    ///
    /// This operation does not fail: a store or mapping failure is logged and
    /// reported as [`PolicyPage::empty`].
    async fn get_policies_filtered_with_pagination(
        &self,
        filter: &PolicyFilter,
        page: PageRequest,
    ) -> PolicyPage;

    /// Stores a new policy together with its policyholder, premium and coverages
    ///
    /// # Errors
    ///
    /// `PortError::Conflict` if the policy number is already taken
    async fn create_insurance_policy(&self, policy: Policy) -> Result<Policy, PortError>;
}

/// Mock implementation of PolicyPort for testing
///
/// Stores policies in memory with the same filtering, ordering, paging and
/// conflict behaviour as the PostgreSQL adapter.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};
    use tokio::sync::RwLock;

    /// In-memory mock implementation of PolicyPort
    #[derive(Debug, Default)]
    pub struct MockPolicyPort {
        policies: Arc<RwLock<Vec<Policy>>>,
        unavailable: AtomicBool,
    }

    impl MockPolicyPort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with policies, bypassing conflict checks
        pub async fn with_policies(policies: Vec<Policy>) -> Self {
            let port = Self::new();
            port.policies.write().await.extend(policies);
            port
        }

        /// Simulates a store outage (or its end)
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Number of stored policies
        pub async fn len(&self) -> usize {
            self.policies.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }

        fn ensure_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::connection("mock policy store is unavailable"));
            }
            Ok(())
        }

        fn newest_first(mut policies: Vec<Policy>) -> Vec<Policy> {
            policies.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
            });
            policies
        }
    }

    impl DomainPort for MockPolicyPort {}

    #[async_trait]
    impl HealthCheckable for MockPolicyPort {
        async fn health_check(&self) -> HealthCheckResult {
            let (status, message) = if self.unavailable.load(Ordering::SeqCst) {
                (AdapterHealth::Unhealthy, "Mock store marked unavailable")
            } else {
                (AdapterHealth::Healthy, "Mock adapter healthy")
            };
            HealthCheckResult {
                adapter_id: "mock-policy-port".to_string(),
                status,
                latency_ms: 0,
                message: Some(message.to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl PolicyPort for MockPolicyPort {
        async fn get_all_policies(&self) -> Result<Vec<Policy>, PortError> {
            self.ensure_available()?;
            let policies = self.policies.read().await.clone();
            Ok(Self::newest_first(policies))
        }

        async fn get_single_policy_by_number(
            &self,
            policy_number: &str,
        ) -> Result<Option<Policy>, PortError> {
            self.ensure_available()?;
            Ok(self
                .policies
                .read()
                .await
                .iter()
                .find(|p| p.policy_number == policy_number)
                .cloned())
        }

        async fn get_policies_filtered_with_pagination(
            &self,
            filter: &PolicyFilter,
            page: PageRequest,
        ) -> PolicyPage {
            if self.ensure_available().is_err() {
                return PolicyPage::empty();
            }

            let predicate = filter.to_predicate();
            let matching: Vec<Policy> = self
                .policies
                .read()
                .await
                .iter()
                .filter(|p| predicate.matches(p))
                .cloned()
                .collect();
            let total_count = matching.len() as u64;

            let pagination = page.normalize();
            let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
            let limit = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);
            let policies = Self::newest_first(matching)
                .into_iter()
                .skip(offset)
                .take(limit)
                .collect();

            PolicyPage::new(policies, total_count)
        }

        async fn create_insurance_policy(&self, policy: Policy) -> Result<Policy, PortError> {
            self.ensure_available()?;
            let mut policies = self.policies.write().await;
            if policies.iter().any(|p| p.policy_number == policy.policy_number) {
                return Err(PortError::conflict(format!(
                    "Policy number {} already exists",
                    policy.policy_number
                )));
            }
            policies.push(policy.clone());
            Ok(policy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockPolicyPort;
    use super::*;
    use crate::address::Address;
    use crate::enums::PolicyType;
    use crate::person::Person;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn policy(number: &str, policy_type: PolicyType, minutes: i64) -> Policy {
        let holder = Person {
            id_number: format!("ID-{number}"),
            first_name: "Sam".to_string(),
            last_name: "Lee".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1975, 7, 4).unwrap(),
            email: "sam@example.com".to_string(),
            phone: "555-0101".to_string(),
            address: Address::new("5 Oak Ave", "Ogdenville", "20002", "USA"),
        };
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut policy = Policy::new(number, policy_type, start, start + Duration::days(30), holder);
        policy.created_at = start + Duration::minutes(minutes);
        policy
    }

    async fn seeded() -> MockPolicyPort {
        MockPolicyPort::with_policies(vec![
            policy("AUTO-1", PolicyType::Auto, 1),
            policy("AUTO-2", PolicyType::Auto, 2),
            policy("AUTO-3", PolicyType::Auto, 3),
            policy("HOME-1", PolicyType::Home, 4),
            policy("HOME-2", PolicyType::Home, 5),
        ])
        .await
    }

    #[tokio::test]
    async fn test_filtered_page_with_total() {
        let port = seeded().await;
        let filter = PolicyFilter::new().of_type(PolicyType::Auto);

        let page = port
            .get_policies_filtered_with_pagination(&filter, PageRequest::new(1, 2))
            .await;

        assert_eq!(page.total_count, 3);
        let numbers: Vec<_> = page.policies.iter().map(|p| p.policy_number.as_str()).collect();
        assert_eq!(numbers, vec!["AUTO-3", "AUTO-2"]);
    }

    #[tokio::test]
    async fn test_last_and_past_last_page() {
        let port = seeded().await;
        let filter = PolicyFilter::new();

        let last = port
            .get_policies_filtered_with_pagination(&filter, PageRequest::new(3, 2))
            .await;
        assert_eq!(last.policies.len(), 1);
        assert_eq!(last.policies[0].policy_number, "AUTO-1");
        assert_eq!(last.total_count, 5);

        let past = port
            .get_policies_filtered_with_pagination(&filter, PageRequest::new(4, 2))
            .await;
        assert!(past.policies.is_empty());
        assert_eq!(past.total_count, 5);
    }

    #[tokio::test]
    async fn test_duplicate_number_conflicts() {
        let port = MockPolicyPort::new();
        port.create_insurance_policy(policy("POL-1", PolicyType::Life, 0))
            .await
            .unwrap();

        let error = port
            .create_insurance_policy(policy("POL-1", PolicyType::Health, 1))
            .await
            .unwrap_err();

        assert!(error.is_conflict());
        assert_eq!(port.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookup_by_number() {
        let port = seeded().await;
        let found = port.get_single_policy_by_number("HOME-2").await.unwrap();
        assert_eq!(found.map(|p| p.policy_type), Some(PolicyType::Home));
        assert!(port.get_single_policy_by_number("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_outage_degrades_listing_only() {
        let port = seeded().await;
        port.set_unavailable(true);

        let page = port
            .get_policies_filtered_with_pagination(&PolicyFilter::new(), PageRequest::default())
            .await;
        assert_eq!(page, PolicyPage::empty());

        let error = port.get_all_policies().await.unwrap_err();
        assert!(error.is_transient());
        assert!(!port.health_check().await.is_operational());

        port.set_unavailable(false);
        assert_eq!(port.get_all_policies().await.unwrap().len(), 5);
    }
}
