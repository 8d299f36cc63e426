//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `FEE_PROPOSAL` prefix and
//! `__` between nesting levels.
//!
//! # Example
//!
//! ```no_run
//! use fee_proposal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod document;
mod error;
mod pricing;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use document::DocumentConfig;
pub use error::{ConfigError, ValidationError};
pub use pricing::PricingConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment starts a development
/// server with built-in rates and in-memory storage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; absent means in-memory storage
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub document: DocumentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `FEE_PROPOSAL__*` variables:
    ///
    /// - `FEE_PROPOSAL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FEE_PROPOSAL__DATABASE__URL=...` -> `database.url = ...`
    /// - `FEE_PROPOSAL__PRICING__RATE_TABLE_PATH=rates/default.yaml`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FEE_PROPOSAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        self.pricing.validate()?;
        self.document.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
