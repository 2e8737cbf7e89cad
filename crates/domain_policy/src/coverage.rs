//! Coverage clauses
//!
//! A coverage describes what a policy insures against, up to which limit,
//! with which deductible and exclusions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// A clause of a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    /// Free-text coverage kind, e.g. "liability" or "collision"
    #[serde(rename = "type")]
    pub coverage_type: String,
    pub description: String,
    /// Maximum payout; `None` means no stated limit
    #[serde(default)]
    pub limit: Option<Decimal>,
    pub deductible: Decimal,
    #[serde(default)]
    pub exclusions: Vec<String>,
}

impl Coverage {
    /// Creates a coverage without limit or exclusions
    pub fn new(
        coverage_type: impl Into<String>,
        description: impl Into<String>,
        deductible: Decimal,
    ) -> Self {
        Self {
            coverage_type: coverage_type.into(),
            description: description.into(),
            limit: None,
            deductible,
            exclusions: Vec::new(),
        }
    }

    /// Sets the coverage limit
    pub fn with_limit(mut self, limit: Decimal) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Adds an exclusion
    pub fn exclude(mut self, exclusion: impl Into<String>) -> Self {
        self.exclusions.push(exclusion.into());
        self
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.coverage_type.trim().is_empty() {
            return Err(PolicyError::InvalidCoverage("type must not be blank".to_string()));
        }
        if self.deductible < Decimal::ZERO {
            return Err(PolicyError::InvalidCoverage(format!(
                "{}: deductible must not be negative",
                self.coverage_type
            )));
        }
        if matches!(self.limit, Some(limit) if limit < Decimal::ZERO) {
            return Err(PolicyError::InvalidCoverage(format!(
                "{}: limit must not be negative",
                self.coverage_type
            )));
        }
        Ok(())
    }
}
