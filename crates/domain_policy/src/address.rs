//! Address types

use serde::{Deserialize, Serialize};

/// A postal address, owned by exactly one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub zip_code: String,
    pub country: String,
}

impl Address {
    /// Creates a new address without a state/province
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        zip_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: None,
            zip_code: zip_code.into(),
            country: country.into(),
        }
    }

    /// Sets the state/province
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Formats address for display
    pub fn format(&self) -> String {
        let city_line = match &self.state {
            Some(state) => format!("{}, {} {}", self.city, state, self.zip_code),
            None => format!("{} {}", self.city, self.zip_code),
        };
        [self.street.clone(), city_line, self.country.clone()].join("\n")
    }
}
