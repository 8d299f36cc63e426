//! Proposal module - pure rules around the pricing engine.
//!
//! Editing, draft migration, export checks and the saved-proposal record.
//! None of it changes how a fee is computed.

mod edit;
mod errors;
mod export_rules;
mod migration;
mod saved;

pub use edit::{InputEdit, VisualizationField};
pub use errors::ProposalError;
pub use export_rules::{
    export_filename, validate_for_export, ScopeSection, AREA_REQUIRED, PROJECT_NAME_REQUIRED,
};
pub use migration::{migrate_draft, DraftSnapshot, DraftState, MigrationError, DRAFT_SCHEMA_VERSION};
pub use saved::SavedProposal;
