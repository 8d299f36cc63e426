//! ListProposalsHandler - Query handler for the caller's saved proposals.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::proposal::{ProposalError, SavedProposal};
use crate::ports::ProposalRepository;

#[derive(Debug, Clone)]
pub struct ListProposalsQuery {
    pub user_id: UserId,
}

/// Lists a user's proposals, newest first.
pub struct ListProposalsHandler {
    repository: Arc<dyn ProposalRepository>,
}

impl ListProposalsHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListProposalsQuery) -> Result<Vec<SavedProposal>, ProposalError> {
        Ok(self.repository.list_by_user(&query.user_id).await?)
    }
}
