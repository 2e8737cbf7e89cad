//! Policyholder types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::PolicyError;

/// A natural person holding a policy
///
/// `id_number` is an external identifier (national id, passport number) and
/// is not unique across stored persons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

impl Person {
    /// Checks the fields a policyholder cannot be stored without
    pub fn validate(&self) -> Result<(), PolicyError> {
        require("policyholder.id_number", &self.id_number)?;
        require("policyholder.first_name", &self.first_name)?;
        require("policyholder.last_name", &self.last_name)?;
        require("policyholder.address.street", &self.address.street)?;
        require("policyholder.address.city", &self.address.city)?;
        require("policyholder.address.zip_code", &self.address.zip_code)?;
        require("policyholder.address.country", &self.address.country)?;

        if !is_plausible_email(&self.email) {
            return Err(PolicyError::validation(format!(
                "policyholder.email '{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), PolicyError> {
    if value.trim().is_empty() {
        return Err(PolicyError::MissingRequiredField(field.to_string()));
    }
    Ok(())
}

/// Shape check only: one '@', non-empty local part, dotted domain
fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_plausible_email("john.doe@example.com"));
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("john.doe"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("john@localhost"));
        assert!(!is_plausible_email("john@@example.com"));
        assert!(!is_plausible_email("john doe@example.com"));
        assert!(!is_plausible_email("john@example..com"));
    }
}
