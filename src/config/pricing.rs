//! Pricing configuration

use serde::Deserialize;
use std::path::Path;

use super::error::ValidationError;

/// Where rates come from. Both fields are optional; the built-in studio
/// rates apply when neither is set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingConfig {
    /// JSON or YAML rate table, replacing the built-in rates
    pub rate_table_path: Option<String>,

    /// Overrides the table's engagement activation fee
    pub engagement_activation_fee: Option<f64>,
}

impl PricingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.rate_table_path {
            let ext = Path::new(path)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase());
            if !matches!(ext.as_deref(), Some("json" | "yaml" | "yml")) {
                return Err(ValidationError::UnsupportedRateTable(path.clone()));
            }
        }
        if let Some(fee) = self.engagement_activation_fee {
            if !fee.is_finite() || fee < 0.0 {
                return Err(ValidationError::InvalidEngagementFee);
            }
        }
        Ok(())
    }
}
