//! Policy domain errors
//!
//! This module defines all error types that can occur within the
//! policy records domain.

use thiserror::Error;

use core_kernel::{PortError, TemporalError};

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Required field is missing or blank
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Policy period is not strictly ordered
    #[error("Invalid policy period: {0}")]
    InvalidPeriod(#[from] TemporalError),

    /// Premium amount or schedule is invalid
    #[error("Invalid premium: {0}")]
    InvalidPremium(String),

    /// Invalid coverage configuration
    #[error("Invalid coverage: {0}")]
    InvalidCoverage(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl PolicyError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PolicyError::Validation(message.into())
    }

    /// Name of the offending field, when the error pins one down
    pub fn field(&self) -> Option<&str> {
        match self {
            PolicyError::MissingRequiredField(field) => Some(field),
            PolicyError::InvalidPeriod(_) => Some("expiration_date"),
            PolicyError::InvalidPremium(_) => Some("premium.amount"),
            PolicyError::InvalidCoverage(_) => Some("coverages"),
            _ => None,
        }
    }
}

impl From<PolicyError> for PortError {
    fn from(error: PolicyError) -> Self {
        match error.field().map(str::to_owned) {
            Some(field) => PortError::validation_field(error.to_string(), field),
            None => PortError::validation(error.to_string()),
        }
    }
}
