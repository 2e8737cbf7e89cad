//! Core Kernel - Foundational types and utilities for the policy records service
//!
//! This crate provides the building blocks shared by every other crate:
//! - Temporal types for policy periods and inclusive filter ranges
//! - Typed identifiers for stored entities
//! - Port/adapter error and health types

pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use temporal::{ValidPeriod, TimestampRange, TemporalError};
pub use identifiers::{PolicyId, PersonId, AddressId, PremiumId, CoverageId};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
