//! Rate table held in memory for the life of the process.

use std::sync::Arc;

use crate::domain::pricing::PricingTables;
use crate::ports::{RateTableError, RateTableProvider};

/// Serves one validated table, the built-in studio rates unless told otherwise.
#[derive(Debug, Clone)]
pub struct StaticRateTableProvider {
    tables: Arc<PricingTables>,
}

impl StaticRateTableProvider {
    /// Provider for the built-in studio rates.
    pub fn defaults() -> Self {
        Self {
            tables: Arc::new(PricingTables::defaults().clone()),
        }
    }

    /// Provider for a caller-supplied table. The table is validated first.
    pub fn new(tables: PricingTables) -> Result<Self, RateTableError> {
        tables.validate()?;
        Ok(Self {
            tables: Arc::new(tables),
        })
    }

    /// Replaces the engagement activation fee, keeping every other rate.
    pub fn with_engagement_fee(self, fee: f64) -> Result<Self, RateTableError> {
        let mut tables = (*self.tables).clone();
        tables.engagement_activation_fee = fee;
        Self::new(tables)
    }
}

impl Default for StaticRateTableProvider {
    fn default() -> Self {
        Self::defaults()
    }
}

impl RateTableProvider for StaticRateTableProvider {
    fn tables(&self) -> Result<Arc<PricingTables>, RateTableError> {
        Ok(Arc::clone(&self.tables))
    }
}
