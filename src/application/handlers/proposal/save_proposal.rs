//! SaveProposalHandler - Command handler for storing a priced proposal.
//!
//! The stored output is always recomputed from the submitted inputs with the
//! active rate table. An output sent by the client is only compared.

use std::sync::Arc;

use crate::domain::foundation::{ProposalId, Timestamp, UserId};
use crate::domain::pricing::{ProposalCalculator, ProposalInput, ProposalOutput};
use crate::domain::proposal::{ProposalError, SavedProposal};
use crate::ports::{ProposalRepository, RateTableProvider};

/// Command to save a proposal for the caller.
#[derive(Debug, Clone)]
pub struct SaveProposalCommand {
    pub user_id: UserId,
    pub inputs: ProposalInput,
    /// Output as the client computed it, if sent.
    pub client_outputs: Option<serde_json::Value>,
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveProposalResult {
    pub id: ProposalId,
    pub created_at: Timestamp,
}

/// Handler for saving proposals.
pub struct SaveProposalHandler {
    repository: Arc<dyn ProposalRepository>,
    rates: Arc<dyn RateTableProvider>,
}

impl SaveProposalHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>, rates: Arc<dyn RateTableProvider>) -> Self {
        Self { repository, rates }
    }

    pub async fn handle(&self, cmd: SaveProposalCommand) -> Result<SaveProposalResult, ProposalError> {
        let tables = self
            .rates
            .tables()
            .map_err(|e| ProposalError::configuration(e.to_string()))?;
        let outputs = ProposalCalculator::compute(&cmd.inputs, &tables)?;

        if let Some(submitted) = &cmd.client_outputs {
            if !matches_submitted(submitted, &outputs) {
                tracing::warn!(
                    user_id = %cmd.user_id,
                    "Submitted outputs differ from server calculation; storing recomputed outputs"
                );
            }
        }

        let proposal = SavedProposal::new(cmd.user_id, cmd.inputs, outputs);
        self.repository.save(&proposal).await?;

        tracing::info!(
            proposal_id = %proposal.id,
            user_id = %proposal.user_id,
            total_fee = proposal.outputs.total_fee,
            "Proposal saved"
        );

        Ok(SaveProposalResult {
            id: proposal.id,
            created_at: proposal.created_at,
        })
    }
}

/// Compares typed values, so `100` and `100.0` are the same area.
/// A payload that is not a `ProposalOutput` never matches.
fn matches_submitted(submitted: &serde_json::Value, recomputed: &ProposalOutput) -> bool {
    serde_json::from_value::<ProposalOutput>(submitted.clone())
        .map(|parsed| parsed == *recomputed)
        .unwrap_or(false)
}
