//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Bearer token validation settings.
///
/// With an issuer configured, tokens are verified against the issuer's JWKS.
/// Without one (development only), `dev_token` is the single accepted token
/// and authenticates as `dev_user_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// OIDC issuer URL
    #[serde(default)]
    pub issuer_url: String,

    /// Expected `aud` claim
    #[serde(default)]
    pub audience: String,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,

    pub dev_token: Option<String>,

    #[serde(default = "default_dev_user_id")]
    pub dev_user_id: String,
}

impl AuthConfig {
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    /// Whether tokens are verified by an OIDC issuer.
    pub fn uses_issuer(&self) -> bool {
        !self.issuer_url.trim().is_empty()
    }

    /// In production an HTTPS issuer is required and the development token is refused.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let production = *environment == Environment::Production;

        if production && self.dev_token.is_some() {
            return Err(ValidationError::DevTokenInProduction);
        }
        if !self.uses_issuer() {
            if production {
                return Err(ValidationError::MissingRequired("AUTH__ISSUER_URL"));
            }
            return Ok(());
        }
        if self.audience.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }
        if production && !self.issuer_url.starts_with("https://") {
            return Err(ValidationError::IssuerMustBeHttps);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer_url: String::new(),
            audience: String::new(),
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
            dev_token: None,
            dev_user_id: default_dev_user_id(),
        }
    }
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}

fn default_dev_user_id() -> String {
    "dev-user".to_string()
}
