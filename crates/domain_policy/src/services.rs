//! Policy domain services
//!
//! This module contains the application service that sits between the HTTP
//! edge and the policy port.

use std::sync::Arc;

use tracing::{debug, warn};

use core_kernel::{HealthCheckResult, PortError};

use crate::filter::{PageRequest, PolicyFilter, PolicyPage};
use crate::policy::Policy;
use crate::ports::PolicyPort;

/// Service for reading and creating policy records
///
/// Validates policies before they reach the store and otherwise delegates to
/// whichever [`PolicyPort`] it was built with.
#[derive(Clone)]
pub struct PolicyService {
    port: Arc<dyn PolicyPort>,
}

impl PolicyService {
    /// Creates a service over the given port
    pub fn new(port: Arc<dyn PolicyPort>) -> Self {
        Self { port }
    }

    pub async fn find_by_number(&self, policy_number: &str) -> Result<Option<Policy>, PortError> {
        self.port.get_single_policy_by_number(policy_number).await
    }

    /// Returns a page of matching policies; an empty page on store failure
    pub async fn search(&self, filter: &PolicyFilter, page: PageRequest) -> PolicyPage {
        self.port
            .get_policies_filtered_with_pagination(filter, page)
            .await
    }

    /// Validates and stores a new policy
    ///
    /// # Errors
    ///
    /// * `PortError::Validation` - the policy breaks a domain invariant
    /// * `PortError::Conflict` - the policy number is already taken
    pub async fn create(&self, policy: Policy) -> Result<Policy, PortError> {
        if let Err(error) = policy.validate() {
            warn!(policy_number = %policy.policy_number, %error, "Rejected invalid policy");
            return Err(error.into());
        }
        debug!(policy_number = %policy.policy_number, "Creating policy");
        self.port.create_insurance_policy(policy).await
    }

    /// Health of the underlying store
    pub async fn health(&self) -> HealthCheckResult {
        self.port.health_check().await
    }
}

impl std::fmt::Debug for PolicyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::enums::PolicyType;
    use crate::person::Person;
    use crate::ports::mock::MockPolicyPort;
    use chrono::{Duration, NaiveDate, Utc};

    fn service() -> (PolicyService, Arc<MockPolicyPort>) {
        let port = Arc::new(MockPolicyPort::new());
        (PolicyService::new(port.clone()), port)
    }

    fn policy() -> Policy {
        let holder = Person {
            id_number: "X-1".to_string(),
            first_name: "Lou".to_string(),
            last_name: "Park".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 2, 29).unwrap(),
            email: "lou@example.org".to_string(),
            phone: "555-0199".to_string(),
            address: Address::new("9 Elm Rd", "Capital City", "30003", "USA"),
        };
        let now = Utc::now();
        Policy::new("POL-9", PolicyType::Business, now, now + Duration::days(90), holder)
    }

    #[tokio::test]
    async fn test_invalid_policy_never_reaches_store() {
        let (service, port) = service();
        let mut invalid = policy();
        invalid.expiration_date = invalid.effective_date;

        let error = service.create(invalid).await.unwrap_err();

        assert!(matches!(error, PortError::Validation { .. }));
        assert!(port.is_empty().await);
    }

    #[tokio::test]
    async fn test_created_policy_is_readable() {
        let (service, _port) = service();
        let created = service.create(policy()).await.unwrap();

        let found = service.find_by_number("POL-9").await.unwrap();
        assert_eq!(found, Some(created));
        assert!(service.health().await.is_operational());
    }
}
