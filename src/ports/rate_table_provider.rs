//! Rate table provider port.
//!
//! The engine never loads rates itself; callers fetch a table from a provider
//! and pass it in. Providers validate the table before serving it.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::pricing::{PricingTables, TableValidationError};

/// Supplies the active rate table.
pub trait RateTableProvider: Send + Sync {
    /// The table to price against.
    fn tables(&self) -> Result<Arc<PricingTables>, RateTableError>;
}

/// Errors loading a rate table. All of them are configuration defects.
#[derive(Debug, Error)]
pub enum RateTableError {
    #[error("Failed to read rate table {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse rate table {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Unsupported rate table format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("Invalid rate table: {0}")]
    Invalid(#[from] TableValidationError),
}

impl RateTableError {
    pub fn io(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
