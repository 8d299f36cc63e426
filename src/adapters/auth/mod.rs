//! Authentication adapters implementing `SessionValidator`.
//!
//! - `oidc` - JWKS-backed validation for any OIDC issuer
//! - `mock` - Fixed token table for tests and local development

mod mock;
mod oidc;

pub use mock::MockSessionValidator;
pub use oidc::{OidcConfig, OidcSessionValidator};
