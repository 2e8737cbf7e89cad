//! Errors raised while assembling the service, before any port is called

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Settings are missing, malformed or contradict each other
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}
