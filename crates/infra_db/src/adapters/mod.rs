//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresPolicyAdapter;
//! use domain_policy::PolicyPort;
//!
//! let adapter = PostgresPolicyAdapter::new(pool);
//! let policy = adapter.get_single_policy_by_number("POL-1").await?;
//! ```

pub mod policy;

pub use policy::PostgresPolicyAdapter;
