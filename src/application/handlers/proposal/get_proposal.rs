//! GetProposalHandler - Query handler for one saved proposal.

use std::sync::Arc;

use crate::domain::foundation::{ProposalId, UserId};
use crate::domain::proposal::{ProposalError, SavedProposal};
use crate::ports::ProposalRepository;

/// Query to get a saved proposal by ID.
#[derive(Debug, Clone)]
pub struct GetProposalQuery {
    pub proposal_id: ProposalId,
    pub user_id: UserId,
}

/// Handler for retrieving a saved proposal.
pub struct GetProposalHandler {
    repository: Arc<dyn ProposalRepository>,
}

impl GetProposalHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetProposalQuery) -> Result<SavedProposal, ProposalError> {
        let proposal = self
            .repository
            .find_by_id(&query.proposal_id)
            .await?
            .ok_or_else(|| ProposalError::not_found(query.proposal_id))?;

        // Other users' proposals are indistinguishable from missing ones.
        if !proposal.is_owned_by(&query.user_id) {
            return Err(ProposalError::not_found(query.proposal_id));
        }

        Ok(proposal)
    }
}
