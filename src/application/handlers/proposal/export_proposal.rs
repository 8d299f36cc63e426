//! ExportProposalHandler - Command handler that produces a downloadable proposal.
//!
//! Validates the input, prices it, renders the Markdown document and converts
//! it to the requested format.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::pricing::{ProposalCalculator, ProposalInput};
use crate::domain::proposal::{validate_for_export, ProposalError};
use crate::ports::{
    DocumentExportService, ExportError, ExportFormat, ExportedDocument, ProposalRenderer,
    RenderError, RateTableProvider,
};

/// Command to export a proposal document.
#[derive(Debug, Clone)]
pub struct ExportProposalCommand {
    pub input: ProposalInput,
    pub format: ExportFormat,
    /// Date printed on the cover page.
    pub issued_on: Timestamp,
}

/// Handler for exporting proposal documents.
///
/// # Dependencies
///
/// - `RateTableProvider`: active rates
/// - `ProposalRenderer`: Markdown document
/// - `DocumentExportService`: HTML/PDF conversion
pub struct ExportProposalHandler {
    rates: Arc<dyn RateTableProvider>,
    renderer: Arc<dyn ProposalRenderer>,
    exporter: Arc<dyn DocumentExportService>,
}

impl ExportProposalHandler {
    pub fn new(
        rates: Arc<dyn RateTableProvider>,
        renderer: Arc<dyn ProposalRenderer>,
        exporter: Arc<dyn DocumentExportService>,
    ) -> Self {
        Self {
            rates,
            renderer,
            exporter,
        }
    }

    pub async fn handle(&self, cmd: ExportProposalCommand) -> Result<ExportedDocument, ProposalError> {
        let problems = validate_for_export(&cmd.input);
        if !problems.is_empty() {
            return Err(ProposalError::ExportValidation(problems));
        }

        let tables = self
            .rates
            .tables()
            .map_err(|e| ProposalError::configuration(e.to_string()))?;
        let output = ProposalCalculator::compute(&cmd.input, &tables)?;

        let markdown = self
            .renderer
            .render_markdown(&cmd.input, &output, &cmd.issued_on)
            .map_err(|e| match e {
                RenderError::IncompleteInput(problems) => ProposalError::ExportValidation(problems),
            })?;

        let content = match cmd.format {
            ExportFormat::Markdown => markdown.into_bytes(),
            ExportFormat::Html => self
                .exporter
                .to_html(&markdown)
                .await
                .map_err(export_failed)?
                .into_bytes(),
            ExportFormat::Pdf => self.exporter.to_pdf(&markdown).await.map_err(export_failed)?,
        };

        tracing::info!(
            format = %cmd.format,
            bytes = content.len(),
            total_fee = output.total_fee,
            "Proposal exported"
        );

        Ok(ExportedDocument::new(content, cmd.format, &cmd.input.project_name))
    }
}

fn export_failed(err: ExportError) -> ProposalError {
    tracing::error!(error = %err, "Proposal export failed");
    ProposalError::document(err.to_string())
}
