//! Command and query handlers.

pub mod proposal;

pub use proposal::{
    CalculateProposalHandler, CalculateProposalQuery, ExportProposalCommand,
    ExportProposalHandler, GetProposalHandler, GetProposalQuery, ListProposalsHandler,
    ListProposalsQuery, SaveProposalCommand, SaveProposalHandler, SaveProposalResult,
};
