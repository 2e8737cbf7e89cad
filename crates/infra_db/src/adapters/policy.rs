//! PostgreSQL Policy Adapter
//!
//! This module provides the internal (database) adapter for the policy domain,
//! implementing the `PolicyPort` trait using PostgreSQL via the `PolicyRepository`.
//!
//! # Overview
//!
//! The `PostgresPolicyAdapter` serves as the bridge between the domain layer's
//! port interface and the database layer. It:
//!
//! - Translates domain requests into repository operations
//! - Converts stored records back to domain policies
//! - Handles error translation between database and port errors
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresPolicyAdapter;
//! use domain_policy::PolicyPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn PolicyPort> = Arc::new(PostgresPolicyAdapter::new(pool));
//! let policies = port.get_all_policies().await?;
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, error, instrument};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_policy::{PageRequest, Policy, PolicyFilter, PolicyPage, PolicyPort};

use crate::error::DatabaseError;
use crate::mapping::{policy_to_rows, record_to_policy, records_to_policies};
use crate::repositories::PolicyRepository;

/// PostgreSQL-backed implementation of the PolicyPort trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
/// - Connection and pool errors -> `PortError::Connection`
/// - `DatabaseError::Mapping` -> `PortError::Transformation`
/// - Other errors -> `PortError::Internal`
///
/// The filtered listing never returns an error: failures are logged and an
/// empty page is returned.
#[derive(Debug, Clone)]
pub struct PostgresPolicyAdapter {
    repository: PolicyRepository,
    pool: PgPool,
}

impl PostgresPolicyAdapter {
    /// Creates a new PostgreSQL policy adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PolicyRepository::new(pool.clone()),
            pool,
        }
    }

    async fn try_filtered_page(
        &self,
        filter: &PolicyFilter,
        page: PageRequest,
    ) -> Result<PolicyPage, DatabaseError> {
        let (records, total_count) = self
            .repository
            .find_page(&filter.to_predicate(), page.normalize())
            .await?;
        let policies = records_to_policies(records)?;
        Ok(PolicyPage::new(policies, total_count))
    }
}

impl DomainPort for PostgresPolicyAdapter {}

#[async_trait]
impl HealthCheckable for PostgresPolicyAdapter {
    /// Checks database connectivity with `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (
                AdapterHealth::Unhealthy,
                Some(format!("Database error: {}", e)),
            ),
        };

        HealthCheckResult {
            adapter_id: "postgres-policy-adapter".to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl PolicyPort for PostgresPolicyAdapter {
    #[instrument(skip(self))]
    async fn get_all_policies(&self) -> Result<Vec<Policy>, PortError> {
        debug!("Fetching all policies");

        let records = self.repository.find_all().await.map_err(db_to_port_error)?;
        records_to_policies(records).map_err(|e| db_to_port_error(e.into()))
    }

    #[instrument(skip(self))]
    async fn get_single_policy_by_number(
        &self,
        policy_number: &str,
    ) -> Result<Option<Policy>, PortError> {
        debug!("Fetching policy by number");

        self.repository
            .find_by_number(policy_number)
            .await
            .map_err(db_to_port_error)?
            .map(record_to_policy)
            .transpose()
            .map_err(|e| db_to_port_error(e.into()))
    }

    #[instrument(skip(self, filter), fields(page = page.page, page_size = page.page_size))]
    async fn get_policies_filtered_with_pagination(
        &self,
        filter: &PolicyFilter,
        page: PageRequest,
    ) -> PolicyPage {
        debug!(?filter, "Fetching filtered policy page");

        match self.try_filtered_page(filter, page).await {
            Ok(page) => page,
            Err(e) => {
                error!(error = %e, "Filtered policy listing failed, returning an empty page");
                PolicyPage::empty()
            }
        }
    }

    #[instrument(skip(self, policy), fields(policy_number = %policy.policy_number))]
    async fn create_insurance_policy(&self, policy: Policy) -> Result<Policy, PortError> {
        debug!("Creating policy");

        let record = self
            .repository
            .insert(policy_to_rows(&policy))
            .await
            .map_err(db_to_port_error)?;

        record_to_policy(record).map_err(|e| db_to_port_error(e.into()))
    }
}

/// Converts a database error to a port error
fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::DuplicateEntry(message) => PortError::conflict(message),
        e if e.is_connection_error() => PortError::Connection {
            message: e.to_string(),
            source: Some(Box::new(e)),
        },
        DatabaseError::Mapping(mapping) => PortError::transformation(mapping.to_string()),
        other => PortError::Internal {
            message: other.to_string(),
            source: Some(Box::new(other)),
        },
    }
}
