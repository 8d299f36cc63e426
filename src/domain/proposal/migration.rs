//! Restores editor drafts persisted by earlier versions of the form.
//!
//! A persisted draft is overlaid field by field on the default input, so keys
//! added since the draft was written pick up their defaults. The output is
//! always recomputed; a persisted output is never trusted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::pricing::{PricingError, PricingTables, ProposalCalculator, ProposalInput, ProposalOutput};

/// Version written with every draft snapshot.
pub const DRAFT_SCHEMA_VERSION: u32 = 3;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Persisted draft must be a JSON object")]
    NotAnObject,

    #[error("Persisted draft has an invalid field: {0}")]
    InvalidField(#[from] serde_json::Error),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Editor state as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftState {
    pub input: ProposalInput,
    pub output: ProposalOutput,
}

/// Versioned envelope around a persisted draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub version: u32,
    pub state: DraftState,
}

impl DraftSnapshot {
    /// Wraps state at the current schema version.
    pub fn current(state: DraftState) -> Self {
        Self {
            version: DRAFT_SCHEMA_VERSION,
            state,
        }
    }
}

/// Rebuilds editor state from a persisted draft of any version.
///
/// `persisted` is the stored state object (`{ "input": {...}, ... }`). A
/// missing or null state restores the default input.
pub fn migrate_draft(persisted: &Value, tables: &PricingTables) -> Result<DraftState, MigrationError> {
    let persisted_input = match persisted {
        Value::Null => None,
        Value::Object(state) => match state.get("input") {
            None | Some(Value::Null) => None,
            Some(Value::Object(input)) => Some(input),
            Some(_) => return Err(MigrationError::NotAnObject),
        },
        _ => return Err(MigrationError::NotAnObject),
    };

    let mut merged = match serde_json::to_value(ProposalInput::default())? {
        Value::Object(map) => map,
        _ => return Err(MigrationError::NotAnObject),
    };

    if let Some(saved) = persisted_input {
        overlay(&mut merged, saved);
    }

    let input: ProposalInput = serde_json::from_value(Value::Object(merged))?;
    let output = ProposalCalculator::compute(&input, tables)?;
    Ok(DraftState { input, output })
}

/// Copies saved keys over defaults; `visualization` is merged one level deeper.
fn overlay(defaults: &mut Map<String, Value>, saved: &Map<String, Value>) {
    for (key, value) in saved {
        let merged_nested = match (key.as_str(), value, defaults.get_mut(key)) {
            ("visualization", Value::Object(nested_saved), Some(Value::Object(nested_default))) => {
                for (nested_key, nested_value) in nested_saved {
                    nested_default.insert(nested_key.clone(), nested_value.clone());
                }
                true
            }
            _ => false,
        };
        if !merged_nested {
            defaults.insert(key.clone(), value.clone());
        }
    }
}
