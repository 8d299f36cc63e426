//! Fee breakdown produced by the pricing engine.

use serde::{Deserialize, Serialize};

use super::catalog::Doctrine;
use super::staffing::TeamAllocation;
use crate::domain::foundation::Percentage;

/// A delivery phase with its share of the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseAmount {
    pub phase: String,
    pub percentage: Percentage,
    pub amount: i64,
}

/// Itemized fee proposal. Every currency field is a whole amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalOutput {
    pub doctrine: Doctrine,
    pub base_fee: i64,
    pub complexity_adjustment: i64,
    pub travel_cost: i64,
    pub visualization_cost: i64,
    pub engagement_cost: i64,
    pub subtotal: i64,
    pub total_fee: i64,
    /// Area after the minimum charge floor, in the discipline's unit.
    pub billable_area: f64,
    pub phase_breakdown: Vec<PhaseAmount>,
    pub notes: Vec<String>,
    pub suggested_team_allocation: TeamAllocation,
    pub duration_months: u32,
}

impl ProposalOutput {
    /// Sum of the phase amounts. May drift from `subtotal` by rounding.
    pub fn phase_total(&self) -> i64 {
        self.phase_breakdown.iter().map(|p| p.amount).sum()
    }
}

/// Rounds a currency amount to a whole unit, halves away from zero.
pub(crate) fn to_currency(value: f64) -> i64 {
    value.round() as i64
}
