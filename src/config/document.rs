//! Document export configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Pandoc settings for PDF export. HTML export needs none.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_pandoc_path")]
    pub pandoc_path: String,

    /// LaTeX engine passed to `--pdf-engine`
    #[serde(default = "default_pdf_engine")]
    pub pdf_engine: String,

    #[serde(default = "default_pdf_timeout")]
    pub pdf_timeout_secs: u64,
}

impl DocumentConfig {
    pub fn pdf_timeout(&self) -> Duration {
        Duration::from_secs(self.pdf_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pandoc_path.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DOCUMENT__PANDOC_PATH"));
        }
        if self.pdf_timeout_secs == 0 || self.pdf_timeout_secs > 300 {
            return Err(ValidationError::InvalidPdfTimeout);
        }
        Ok(())
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            pandoc_path: default_pandoc_path(),
            pdf_engine: default_pdf_engine(),
            pdf_timeout_secs: default_pdf_timeout(),
        }
    }
}

fn default_pandoc_path() -> String {
    "pandoc".to_string()
}

fn default_pdf_engine() -> String {
    "xelatex".to_string()
}

fn default_pdf_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DocumentConfig::default();
        assert_eq!(config.pandoc_path, "pandoc");
        assert_eq!(config.pdf_engine, "xelatex");
        assert_eq!(config.pdf_timeout(), Duration::from_secs(30));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn timeout_is_bounded() {
        for secs in [0, 301] {
            let config = DocumentConfig {
                pdf_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidPdfTimeout));
        }
    }
}
