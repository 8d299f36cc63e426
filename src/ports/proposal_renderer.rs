//! Proposal renderer port - turns a priced proposal into a Markdown document.

use thiserror::Error;

use crate::domain::foundation::Timestamp;
use crate::domain::pricing::{ProposalInput, ProposalOutput};

/// Renders the client-facing proposal document.
///
/// Output is Markdown; format conversion is the job of `DocumentExportService`.
pub trait ProposalRenderer: Send + Sync {
    /// Render the full proposal, dated `issued_on`.
    ///
    /// # Errors
    ///
    /// `RenderError::IncompleteInput` when the input fails export validation.
    fn render_markdown(
        &self,
        input: &ProposalInput,
        output: &ProposalOutput,
        issued_on: &Timestamp,
    ) -> Result<String, RenderError>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Proposal is incomplete: {}", .0.join(" "))]
    IncompleteInput(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_input_lists_problems() {
        let err = RenderError::IncompleteInput(vec![
            "Project name is required.".to_string(),
        ]);
        assert_eq!(err.to_string(), "Proposal is incomplete: Project name is required.");
    }

    #[test]
    fn proposal_renderer_is_object_safe() {
        fn _accepts_dyn(_renderer: &dyn ProposalRenderer) {}
    }
}
