//! API configuration

use std::collections::HashMap;
use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;

use core_kernel::CoreError;
use infra_db::DatabaseConfig;

/// API configuration
///
/// Read from `API_*` environment variables; anything unset keeps its
/// default. `DATABASE_URL` is honoured when `API_DATABASE_URL` is absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level, used when `RUST_LOG` is unset
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_connect_timeout_secs: u64,
    /// Path prefix of the policy routes
    pub api_prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/policy_records".to_string(),
            log_level: "info".to_string(),
            db_max_connections: 10,
            db_min_connections: 1,
            db_connect_timeout_secs: 30,
            api_prefix: "/api/v1".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, CoreError> {
        Self::load(Environment::with_prefix("API"), std::env::var("DATABASE_URL").ok())
    }

    /// Loads configuration from an explicit set of variables, as if they
    /// were the process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, CoreError> {
        let fallback_url = vars.get("DATABASE_URL").cloned();
        Self::load(Environment::with_prefix("API").source(Some(vars)), fallback_url)
    }

    fn load(environment: Environment, fallback_url: Option<String>) -> Result<Self, CoreError> {
        let mut builder = Config::builder();
        if let Some(url) = fallback_url {
            builder = builder
                .set_default("database_url", url)
                .map_err(|e| CoreError::configuration(e.to_string()))?;
        }

        let config: Self = builder
            .add_source(environment.try_parsing(true))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CoreError> {
        if !self.api_prefix.starts_with('/') {
            return Err(CoreError::configuration(format!(
                "api_prefix must start with '/', got '{}'",
                self.api_prefix
            )));
        }
        if self.db_min_connections > self.db_max_connections {
            return Err(CoreError::configuration(
                "db_min_connections exceeds db_max_connections",
            ));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings for `infra_db::create_pool`
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
            .max_connections(self.db_max_connections)
            .min_connections(self.db_min_connections)
            .connect_timeout(Duration::from_secs(self.db_connect_timeout_secs))
    }
}
