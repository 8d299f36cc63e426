//! HTTP adapter for proposal endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ExportQuery, ProposalListResponse, SaveProposalRequest, SaveProposalResponse, SavedProposalRef,
};
pub use handlers::ProposalAppState;
pub use routes::proposal_routes;
