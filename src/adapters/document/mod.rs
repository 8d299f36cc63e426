//! Document adapters.
//!
//! - `TemplateProposalRenderer` - Markdown proposal from a fixed template
//! - `PulldownExportService` - Markdown to HTML (pulldown-cmark) and PDF (Pandoc)

mod pulldown_export_service;
mod template_renderer;

pub use pulldown_export_service::PulldownExportService;
pub use template_renderer::TemplateProposalRenderer;
