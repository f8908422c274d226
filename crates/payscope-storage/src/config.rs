//! Connection configuration for the document store.
//!
//! The store is reached through an endpoint/key pair and a logical database
//! name, supplied via the environment. `.env` files are honored through
//! `dotenvy`, matching how deployments inject credentials.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Environment variable naming the store endpoint URL.
pub const ENV_ENDPOINT: &str = "PAYSCOPE_STORE_ENDPOINT";
/// Environment variable naming the store access key.
pub const ENV_KEY: &str = "PAYSCOPE_STORE_KEY";
/// Environment variable naming the logical database.
pub const ENV_DATABASE: &str = "PAYSCOPE_STORE_DATABASE";

/// Errors raised while loading store configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    /// The endpoint is not a usable URL.
    #[error("invalid store endpoint `{0}`: expected an http(s) URL")]
    InvalidEndpoint(String),
}

/// Configuration for the document-store connection.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store endpoint URL.
    pub endpoint: String,
    /// Access key. Redacted from `Debug` output.
    pub key: String,
    /// Logical database name.
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://localhost:8081".into(),
            key: String::new(),
            database: "stripe_nosql_db".into(),
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with the given endpoint and defaults for
    /// the rest.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Sets the access key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the database name.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Loads configuration from the environment, honoring a `.env` file if
    /// one is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] naming the first absent variable,
    /// or [`ConfigError::InvalidEndpoint`] if the endpoint is not an
    /// http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let endpoint = env::var(ENV_ENDPOINT).map_err(|_| ConfigError::MissingVar(ENV_ENDPOINT))?;
        let key = env::var(ENV_KEY).map_err(|_| ConfigError::MissingVar(ENV_KEY))?;
        let database = env::var(ENV_DATABASE).map_err(|_| ConfigError::MissingVar(ENV_DATABASE))?;

        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }

        Ok(Self {
            endpoint,
            key,
            database,
        })
    }
}

// Keys must never reach logs, so Debug is written by hand.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("key", &"***")
            .field("database", &self.database)
            .finish()
    }
}
