//! OIDC adapter for bearer token validation.
//!
//! Validates JWTs issued by any OIDC provider that publishes a JWKS at
//! `{issuer}/.well-known/jwks.json`:
//!
//! 1. Fetch (and cache) the issuer's JWKS
//! 2. Verify the signature with the key named by the token's `kid`
//! 3. Check issuer, audience and expiry
//! 4. Map the subject and profile claims to `AuthenticatedUser`

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

const DEFAULT_JWKS_CACHE: Duration = Duration::from_secs(3600);

/// Issuer and audience the validator accepts.
#[derive(Debug, Clone)]
pub struct OidcConfig {
    pub issuer_url: String,
    pub audience: String,
    pub jwks_cache_duration: Duration,
}

impl OidcConfig {
    pub fn new(issuer_url: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            audience: audience.into(),
            jwks_cache_duration: DEFAULT_JWKS_CACHE,
        }
    }

    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = duration;
        self
    }

    fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    preferred_username: Option<String>,
}

impl Claims {
    fn into_user(self) -> Result<AuthenticatedUser, AuthError> {
        let id = UserId::new(self.sub).map_err(|_| {
            tracing::warn!("Token carries an empty subject");
            AuthError::InvalidToken
        })?;
        Ok(AuthenticatedUser::new(
            id,
            self.email,
            self.name.or(self.preferred_username),
        ))
    }
}

struct CachedJwks {
    jwks: JwkSet,
    fetched_at: Instant,
}

/// JWKS-backed `SessionValidator`.
pub struct OidcSessionValidator {
    config: OidcConfig,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<CachedJwks>>>,
}

impl OidcSessionValidator {
    /// Keys are fetched lazily on the first validation.
    pub fn new(config: OidcConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        })
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let url = self.config.jwks_url();
        tracing::debug!(%url, "Fetching JWKS");

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch JWKS");
            AuthError::service_unavailable(format!("Failed to fetch JWKS: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "JWKS endpoint returned an error");
            return Err(AuthError::service_unavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        response.json::<JwkSet>().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse JWKS");
            AuthError::service_unavailable(format!("Failed to parse JWKS: {}", e))
        })
    }

    async fn jwks(&self) -> Result<JwkSet, AuthError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() <= self.config.jwks_cache_duration {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;
        *self.jwks_cache.write().await = Some(CachedJwks {
            jwks: jwks.clone(),
            fetched_at: Instant::now(),
        });
        Ok(jwks)
    }

    fn decoding_key(
        header: &jsonwebtoken::Header,
        jwks: &JwkSet,
    ) -> Result<(DecodingKey, Algorithm), AuthError> {
        let kid = header.kid.as_ref().ok_or(AuthError::InvalidToken)?;
        let jwk = jwks.find(kid).ok_or_else(|| {
            tracing::warn!(%kid, "No JWKS key matches token kid");
            AuthError::InvalidToken
        })?;

        use jsonwebtoken::jwk::KeyAlgorithm;
        let algorithm = match jwk.common.key_algorithm {
            Some(KeyAlgorithm::RS256) | None => Algorithm::RS256,
            Some(KeyAlgorithm::RS384) => Algorithm::RS384,
            Some(KeyAlgorithm::RS512) => Algorithm::RS512,
            Some(KeyAlgorithm::ES256) => Algorithm::ES256,
            Some(KeyAlgorithm::ES384) => Algorithm::ES384,
            Some(other) => {
                tracing::warn!(?other, "Unsupported JWKS algorithm");
                return Err(AuthError::InvalidToken);
            }
        };

        let key = DecodingKey::from_jwk(jwk).map_err(|_| AuthError::InvalidToken)?;
        Ok((key, algorithm))
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&self.config.issuer_url]);
        validation.set_audience(&[&self.config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

#[async_trait]
impl SessionValidator for OidcSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        let jwks = self.jwks().await?;
        let (key, algorithm) = Self::decoding_key(&header, &jwks)?;

        let data = decode::<Claims>(token, &key, &self.validation(algorithm)).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => {
                    tracing::warn!(error = %e, "Token rejected");
                    AuthError::InvalidToken
                }
            }
        })?;

        data.claims.into_user()
    }
}

impl std::fmt::Debug for OidcSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcSessionValidator")
            .field("issuer_url", &self.config.issuer_url)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn jwks_url_ignores_trailing_slash() {
        let with_slash = OidcConfig::new("https://clerk.hda.id/", "fee-proposal");
        let without = OidcConfig::new("https://clerk.hda.id", "fee-proposal");
        assert_eq!(with_slash.jwks_url(), "https://clerk.hda.id/.well-known/jwks.json");
        assert_eq!(with_slash.jwks_url(), without.jwks_url());
    }

    #[test]
    fn cache_duration_defaults_to_an_hour() {
        let config = OidcConfig::new("https://clerk.hda.id", "fee-proposal");
        assert_eq!(config.jwks_cache_duration, Duration::from_secs(3600));
        let config = config.with_cache_duration(Duration::from_secs(60));
        assert_eq!(config.jwks_cache_duration, Duration::from_secs(60));
    }

    #[test]
    fn claims_map_to_user() {
        let claims: Claims = serde_json::from_value(json!({
            "sub": "user_2abc",
            "email": "principal@hda.id",
            "preferred_username": "principal"
        }))
        .unwrap();

        let user = claims.into_user().unwrap();
        assert_eq!(user.id.as_str(), "user_2abc");
        assert_eq!(user.email.as_deref(), Some("principal@hda.id"));
        assert_eq!(user.display_name.as_deref(), Some("principal"));
    }

    #[test]
    fn email_is_optional() {
        let claims: Claims = serde_json::from_value(json!({ "sub": "user_2abc" })).unwrap();
        let user = claims.into_user().unwrap();
        assert!(user.email.is_none());
    }

    #[test]
    fn empty_subject_is_rejected() {
        let claims: Claims = serde_json::from_value(json!({ "sub": "" })).unwrap();
        assert!(matches!(claims.into_user(), Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn malformed_token_is_rejected_before_fetching_keys() {
        let validator =
            OidcSessionValidator::new(OidcConfig::new("https://clerk.hda.id", "fee-proposal"))
                .unwrap();
        assert!(matches!(
            validator.validate("not-a-jwt").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OidcSessionValidator>();
    }
}
