//! Axum router for proposal endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    calculate_proposal, export_proposal, get_proposal, list_proposals, save_proposal,
    ProposalAppState,
};

/// Proposal routes, mounted at `/api/proposals`.
///
/// - `POST /calculate` - price an input (open)
/// - `POST /export` - download a proposal document (open)
/// - `POST /` - save a proposal (auth)
/// - `GET /` - list saved proposals (auth)
/// - `GET /:id` - one saved proposal (auth)
pub fn proposal_routes() -> Router<ProposalAppState> {
    Router::new()
        .route("/", post(save_proposal).get(list_proposals))
        .route("/calculate", post(calculate_proposal))
        .route("/export", post(export_proposal))
        .route("/:id", get(get_proposal))
}
