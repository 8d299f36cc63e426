//! Session validation port for bearer token validation.
//!
//! Provider-agnostic: implementations exist for any OIDC issuer and for
//! mock testing.
//!
//! All implementations MUST validate:
//! - **Issuer (iss)**: Token must come from expected auth provider
//! - **Audience (aud)**: Token must be intended for this application
//! - **Expiry (exp)**: Token must not be expired

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// HTTP middleware calls this for every Bearer token on a protected route.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed or badly signed tokens
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    impl TestSessionValidator {
        fn with_token(token: &str, user: AuthenticatedUser) -> Self {
            let mut tokens = HashMap::new();
            tokens.insert(token.to_string(), user);
            Self {
                tokens: RwLock::new(tokens),
            }
        }
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    fn principal() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user_principal").unwrap(), None, None)
    }

    #[tokio::test]
    async fn known_token_yields_user() {
        let validator = TestSessionValidator::with_token("tok", principal());
        let user = validator.validate("tok").await.unwrap();
        assert_eq!(user.id.as_str(), "user_principal");
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = TestSessionValidator::with_token("tok", principal());
        assert!(matches!(
            validator.validate("other").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn session_validator_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
