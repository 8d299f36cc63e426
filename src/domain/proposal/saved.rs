//! A proposal stored for an authenticated user.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProposalId, Timestamp, UserId};
use crate::domain::pricing::{ProposalInput, ProposalOutput};

/// Stored `{inputs, outputs}` pair owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProposal {
    pub id: ProposalId,
    pub user_id: UserId,
    pub inputs: ProposalInput,
    pub outputs: ProposalOutput,
    pub created_at: Timestamp,
}

impl SavedProposal {
    /// Creates a new record with a fresh id, stamped now.
    pub fn new(user_id: UserId, inputs: ProposalInput, outputs: ProposalOutput) -> Self {
        Self {
            id: ProposalId::new(),
            user_id,
            inputs,
            outputs,
            created_at: Timestamp::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
