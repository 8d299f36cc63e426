//! In-Memory Proposal Repository
//!
//! Keeps saved proposals in a process-local map. Used when no database is
//! configured, and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ProposalId, UserId};
use crate::domain::proposal::SavedProposal;
use crate::ports::ProposalRepository;

/// In-memory storage for saved proposals
#[derive(Debug, Clone, Default)]
pub struct InMemoryProposalRepository {
    proposals: Arc<RwLock<HashMap<ProposalId, SavedProposal>>>,
}

impl InMemoryProposalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored proposals
    pub async fn count(&self) -> usize {
        self.proposals.read().await.len()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.proposals.write().await.clear();
    }
}

#[async_trait]
impl ProposalRepository for InMemoryProposalRepository {
    async fn save(&self, proposal: &SavedProposal) -> Result<(), DomainError> {
        let mut proposals = self.proposals.write().await;
        if proposals.contains_key(&proposal.id) {
            return Err(DomainError::database(format!(
                "Proposal already exists: {}",
                proposal.id
            )));
        }
        proposals.insert(proposal.id, proposal.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<SavedProposal>, DomainError> {
        Ok(self.proposals.read().await.get(id).cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<SavedProposal>, DomainError> {
        let proposals = self.proposals.read().await;
        let mut owned: Vec<SavedProposal> = proposals
            .values()
            .filter(|p| p.is_owned_by(user_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
