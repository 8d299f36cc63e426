//! Foundation module - Shared domain primitives.
//!
//! Value objects, identifiers, error types and formatting helpers
//! used across the pricing and proposal modules.

mod auth;
mod currency;
mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use currency::{format_currency, format_idr, CurrencyFormat};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ProposalId, UserId};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
