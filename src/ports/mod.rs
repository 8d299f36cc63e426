//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RateTableProvider` - Source of the active rate table
//! - `ProposalRepository` - Storage for saved proposals
//! - `ProposalRenderer` - Markdown rendering of a priced proposal
//! - `DocumentExportService` - Markdown to HTML/PDF conversion
//! - `SessionValidator` - Bearer token validation

mod document_export_service;
mod proposal_renderer;
mod proposal_repository;
mod rate_table_provider;
mod session_validator;

pub use document_export_service::{
    DocumentExportService, ExportError, ExportFormat, ExportedDocument,
};
pub use proposal_renderer::{ProposalRenderer, RenderError};
pub use proposal_repository::ProposalRepository;
pub use rate_table_provider::{RateTableError, RateTableProvider};
pub use session_validator::SessionValidator;
