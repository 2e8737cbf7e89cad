//! Policy Records Domain
//!
//! This crate holds the insurance policy records and the rules they obey,
//! following the ports-and-adapters layout used across the workspace.
//!
//! # Architecture
//!
//! The domain layer is infrastructure-agnostic:
//! - **Records**: `Policy`, with its `Person`, `Address`, `Premium` and `Coverage`
//! - **Filtering**: `PolicyFilter` folds optional constraints into a `Conjunction`
//! - **Ports**: `PolicyPort` is implemented by the PostgreSQL adapter in `infra_db`
//!   and by `ports::mock::MockPolicyPort` under the `mock` feature
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{PolicyFilter, PageRequest, PolicyType};
//!
//! let filter = PolicyFilter::new().of_type(PolicyType::Auto);
//! let page = service.search(&filter, PageRequest::new(1, 2)).await;
//! println!("{} of {}", page.policies.len(), page.total_count);
//! ```

pub mod address;
pub mod coverage;
pub mod enums;
pub mod error;
pub mod filter;
pub mod person;
pub mod policy;
pub mod ports;
pub mod premium;
pub mod services;

pub use address::Address;
pub use coverage::Coverage;
pub use enums::{PaymentFrequency, PaymentMethod, PolicyStatus, PolicyType};
pub use error::PolicyError;
pub use filter::{
    Conjunction, PageRequest, Pagination, PolicyFilter, PolicyPage, PolicyPredicate,
    DEFAULT_PAGE_SIZE,
};
pub use person::Person;
pub use policy::Policy;
pub use ports::PolicyPort;
pub use premium::Premium;
pub use services::PolicyService;
