//! Proposal repository port.
//!
//! Stores `{inputs, outputs}` pairs keyed by the authenticated user. Records
//! are immutable once saved.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProposalId, UserId};
use crate::domain::proposal::SavedProposal;

#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Persist a new proposal.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, proposal: &SavedProposal) -> Result<(), DomainError>;

    /// Find a proposal by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &ProposalId) -> Result<Option<SavedProposal>, DomainError>;

    /// All proposals owned by a user, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<SavedProposal>, DomainError>;
}
