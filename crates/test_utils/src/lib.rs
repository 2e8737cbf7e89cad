//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! policy records test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for people, premiums and coverages
//! - `builders`: Builder patterns for test policies
//! - `database`: PostgreSQL test database management
//! - `assertions`: Custom assertion helpers for policies and pages
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
