//! Request and response bodies for proposal endpoints.

use serde::{Deserialize, Serialize};

use crate::application::SaveProposalResult;
use crate::domain::foundation::{ProposalId, Timestamp};
use crate::domain::proposal::SavedProposal;

/// Body of `POST /api/proposals`.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveProposalRequest {
    pub inputs: crate::domain::pricing::ProposalInput,
    /// Client-side result; compared with the server calculation, never stored.
    #[serde(default)]
    pub outputs: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProposalRef {
    pub id: ProposalId,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveProposalResponse {
    pub ok: bool,
    pub proposal: SavedProposalRef,
}

impl From<SaveProposalResult> for SaveProposalResponse {
    fn from(result: SaveProposalResult) -> Self {
        Self {
            ok: true,
            proposal: SavedProposalRef {
                id: result.id,
                created_at: result.created_at,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProposalListResponse {
    pub proposals: Vec<SavedProposal>,
}

/// Query string of `POST /api/proposals/export`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}
