//! CalculateProposalHandler - Query handler that prices an input.
//!
//! Stateless: fetches the active rate table and runs the engine.

use std::sync::Arc;

use crate::domain::pricing::{ProposalCalculator, ProposalInput, ProposalOutput};
use crate::domain::proposal::ProposalError;
use crate::ports::RateTableProvider;

/// Query to price a proposal input.
#[derive(Debug, Clone)]
pub struct CalculateProposalQuery {
    pub input: ProposalInput,
}

/// Handler for pricing proposals.
pub struct CalculateProposalHandler {
    rates: Arc<dyn RateTableProvider>,
}

impl CalculateProposalHandler {
    pub fn new(rates: Arc<dyn RateTableProvider>) -> Self {
        Self { rates }
    }

    pub fn handle(&self, query: CalculateProposalQuery) -> Result<ProposalOutput, ProposalError> {
        let tables = self
            .rates
            .tables()
            .map_err(|e| ProposalError::configuration(e.to_string()))?;

        let output = ProposalCalculator::compute(&query.input, &tables)?;

        tracing::debug!(
            discipline = %query.input.discipline,
            scope = %query.input.scope,
            total_fee = output.total_fee,
            "Proposal calculated"
        );

        Ok(output)
    }
}
