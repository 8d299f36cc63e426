//! Proposal export: HTML through pulldown-cmark, PDF through Pandoc.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use pulldown_cmark::{html, Options, Parser};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::ports::{DocumentExportService, ExportError};

const DEFAULT_PDF_ENGINE: &str = "xelatex";
const DEFAULT_PDF_TIMEOUT_SECS: u64 = 30;

/// HTML is rendered in-process; PDF shells out to Pandoc, which must be installed.
#[derive(Debug, Clone)]
pub struct PulldownExportService {
    pandoc_path: Option<String>,
    pdf_engine: String,
    pdf_timeout_secs: u64,
}

impl Default for PulldownExportService {
    fn default() -> Self {
        Self::new()
    }
}

impl PulldownExportService {
    pub fn new() -> Self {
        Self {
            pandoc_path: None,
            pdf_engine: DEFAULT_PDF_ENGINE.to_string(),
            pdf_timeout_secs: DEFAULT_PDF_TIMEOUT_SECS,
        }
    }

    /// Use a specific Pandoc binary instead of searching `PATH`.
    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    pub fn with_pdf_engine(mut self, engine: impl Into<String>) -> Self {
        self.pdf_engine = engine.into();
        self
    }

    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.pdf_timeout_secs = timeout_secs;
        self
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    async fn pandoc_installed(&self) -> bool {
        Command::new(self.pandoc_command())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl DocumentExportService for PulldownExportService {
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError> {
        if !self.pandoc_installed().await {
            return Err(ExportError::service_unavailable(format!(
                "Pandoc not found at '{}'",
                self.pandoc_command()
            )));
        }

        let mut child = Command::new(self.pandoc_command())
            .args(["-f", "markdown", "-t", "pdf", "-V", "geometry:margin=1in"])
            .arg(format!("--pdf-engine={}", self.pdf_engine))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::pdf_failed(format!("Failed to start Pandoc: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(markdown.as_bytes())
                .await
                .map_err(|e| ExportError::io_error(format!("Failed to write to Pandoc: {}", e)))?;
        }

        let output = tokio::time::timeout(
            Duration::from_secs(self.pdf_timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| ExportError::Timeout(self.pdf_timeout_secs))?
        .map_err(|e| ExportError::pdf_failed(format!("Pandoc execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(stderr = %stderr.trim(), "Pandoc exited with an error");
            return Err(ExportError::pdf_failed(stderr.trim().to_string()));
        }

        Ok(output.stdout)
    }

    async fn to_html(&self, markdown: &str) -> Result<String, ExportError> {
        let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
        let mut body = String::new();
        html::push_html(&mut body, parser);

        Ok(wrap_html(&body, &document_title(markdown)))
    }

    async fn is_pdf_available(&self) -> bool {
        self.pandoc_installed().await
    }
}

/// Project name from the cover page, or a generic title.
fn document_title(markdown: &str) -> String {
    markdown
        .lines()
        .find_map(|line| line.trim().strip_prefix("- Project Name:"))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Proposal".to_string())
}

fn wrap_html(body: &str, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="id">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="proposal">
{body}
    </article>
</body>
</html>"#,
        title = html_escape(title),
        css = PROPOSAL_CSS,
        body = body
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const PROPOSAL_CSS: &str = r#"
body {
    font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;
    font-size: 15px;
    line-height: 1.55;
    color: #1f2937;
    max-width: 820px;
    margin: 0 auto;
    padding: 2rem;
}

h1 {
    font-size: 2rem;
    margin-bottom: 0.25rem;
}

h2 {
    font-size: 1.2rem;
    margin-top: 2rem;
    padding-bottom: 0.25rem;
    border-bottom: 1px solid #b4b4b4;
}

h3 {
    font-size: 1rem;
    margin-bottom: 0.25rem;
}

ul {
    padding-left: 1.5rem;
}

li {
    margin: 0.2rem 0;
}

@media print {
    body {
        padding: 0;
    }
}
"#;
