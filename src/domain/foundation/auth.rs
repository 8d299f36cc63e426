//! Authentication types for the domain layer.
//!
//! Any OIDC provider can populate these through the `SessionValidator` port;
//! the domain only knows the caller's identity.

use super::UserId;
use thiserror::Error;

/// Caller identity extracted from a validated bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Subject identifier from the auth provider. Saved proposals are keyed by it.
    pub id: UserId,

    /// Email claim, when the provider includes one.
    pub email: Option<String>,

    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email,
            display_name,
        }
    }

    /// Best human-readable label: display name, then email, then subject.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(self.id.as_str())
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_id() -> UserId {
        UserId::new("user_2abc").unwrap()
    }

    #[test]
    fn label_prefers_display_name() {
        let user = AuthenticatedUser::new(
            user_id(),
            Some("principal@hda.id".to_string()),
            Some("Principal".to_string()),
        );
        assert_eq!(user.label(), "Principal");
    }

    #[test]
    fn label_falls_back_to_email_then_subject() {
        let with_email =
            AuthenticatedUser::new(user_id(), Some("principal@hda.id".to_string()), None);
        assert_eq!(with_email.label(), "principal@hda.id");

        let bare = AuthenticatedUser::new(user_id(), None, None);
        assert_eq!(bare.label(), "user_2abc");
    }

    #[test]
    fn auth_error_messages() {
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid or expired token");
        assert_eq!(
            AuthError::service_unavailable("jwks fetch failed").to_string(),
            "Auth service unavailable: jwks fetch failed"
        );
    }

    #[test]
    fn only_service_errors_are_transient() {
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
        assert!(!AuthError::TokenExpired.is_transient());
    }
}
