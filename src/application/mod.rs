//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (save, export) and queries (calculate, get, list) are handled
//! separately; the debounced recalculator serves interactive editing.

pub mod handlers;
mod recalculator;

pub use handlers::{
    CalculateProposalHandler, CalculateProposalQuery, ExportProposalCommand,
    ExportProposalHandler, GetProposalHandler, GetProposalQuery, ListProposalsHandler,
    ListProposalsQuery, SaveProposalCommand, SaveProposalHandler, SaveProposalResult,
};
pub use recalculator::{CalculationResult, DebouncedRecalculator, DEFAULT_DEBOUNCE};
