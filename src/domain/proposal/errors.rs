//! Proposal-level errors surfaced by the application handlers.

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId};
use crate::domain::pricing::PricingError;

#[derive(Debug, Clone, PartialEq)]
pub enum ProposalError {
    /// No proposal with this id is visible to the caller.
    NotFound(ProposalId),
    /// Rate table cannot price the request. A deployment defect.
    Configuration(String),
    /// Input is not complete enough to export.
    ExportValidation(Vec<String>),
    /// Document rendering or conversion failed.
    Document(String),
    /// Storage failure.
    Infrastructure(String),
}

impl ProposalError {
    pub fn not_found(id: ProposalId) -> Self {
        ProposalError::NotFound(id)
    }
    pub fn configuration(message: impl Into<String>) -> Self {
        ProposalError::Configuration(message.into())
    }
    pub fn document(message: impl Into<String>) -> Self {
        ProposalError::Document(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProposalError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ProposalError::NotFound(_) => ErrorCode::ProposalNotFound,
            ProposalError::Configuration(_) => ErrorCode::ConfigurationError,
            ProposalError::ExportValidation(_) => ErrorCode::ValidationFailed,
            ProposalError::Document(_) => ErrorCode::DocumentError,
            ProposalError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ProposalError::NotFound(id) => format!("Proposal not found: {}", id),
            ProposalError::Configuration(msg) => msg.clone(),
            ProposalError::ExportValidation(errors) => errors.join(" "),
            ProposalError::Document(msg) => format!("Document export failed: {}", msg),
            ProposalError::Infrastructure(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for ProposalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProposalError {}

impl From<PricingError> for ProposalError {
    fn from(err: PricingError) -> Self {
        ProposalError::Configuration(err.to_string())
    }
}

impl From<DomainError> for ProposalError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ConfigurationError => ProposalError::Configuration(err.message),
            ErrorCode::DocumentError => ProposalError::Document(err.message),
            _ => ProposalError::Infrastructure(err.message),
        }
    }
}
