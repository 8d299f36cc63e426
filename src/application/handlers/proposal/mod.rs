//! Proposal command and query handlers.

mod calculate_proposal;
mod export_proposal;
mod get_proposal;
mod list_proposals;
mod save_proposal;

pub use calculate_proposal::{CalculateProposalHandler, CalculateProposalQuery};
pub use export_proposal::{ExportProposalCommand, ExportProposalHandler};
pub use get_proposal::{GetProposalHandler, GetProposalQuery};
pub use list_proposals::{ListProposalsHandler, ListProposalsQuery};
pub use save_proposal::{SaveProposalCommand, SaveProposalHandler, SaveProposalResult};
