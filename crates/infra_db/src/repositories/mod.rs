//! Repository implementations
//!
//! Repositories encapsulate SQL and return storage rows. Conversion to
//! domain records is left to the adapters.
//!
//! # Architecture
//!
//! Each repository follows these principles:
//! - Runtime-checked queries built with `sqlx::query_as` and `QueryBuilder`
//! - One connection or transaction per operation
//! - Multi-row writes inside a single transaction

pub mod policy;

pub use policy::PolicyRepository;
