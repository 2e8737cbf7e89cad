//! Infrastructure Database Layer
//!
//! This crate provides PostgreSQL persistence for policy records using SQLx.
//!
//! # Architecture
//!
//! - `rows`: one struct per table plus the joined read row
//! - `mapping`: lossless conversion between rows and domain records
//! - `query`: the shared policy SELECT, predicate rendering and paging
//! - `repositories`: SQL execution, one connection or transaction per call
//! - `adapters`: the `PolicyPort` implementation used by the API
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresPolicyAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/policy_records")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresPolicyAdapter::new(pool.clone());
//! ```

pub mod adapters;
pub mod error;
pub mod mapping;
pub mod pool;
pub mod query;
pub mod repositories;
pub mod rows;

pub use adapters::PostgresPolicyAdapter;
pub use error::{DatabaseError, MappingError};
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool, MIGRATOR};
pub use repositories::PolicyRepository;
