//! Rate table consumed by the pricing engine.
//!
//! Loaded from configuration or served from the built-in defaults; the engine
//! only ever reads it.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::catalog::{ComplexityClass, Discipline, Scope, UnitType};
use crate::domain::foundation::Percentage;

/// Flat fee added when engagement activation is requested.
pub const DEFAULT_ENGAGEMENT_ACTIVATION_FEE: f64 = 26_800_000.0;

fn default_engagement_activation_fee() -> f64 {
    DEFAULT_ENGAGEMENT_ACTIVATION_FEE
}

/// A named delivery phase with its share of the fee and the scope it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeight {
    pub phase: String,
    pub percentage: Percentage,
    pub scope: Scope,
}

impl PhaseWeight {
    pub fn new(phase: impl Into<String>, percentage: u8, scope: Scope) -> Self {
        Self {
            phase: phase.into(),
            percentage: Percentage::new(percentage),
            scope,
        }
    }
}

/// Rates for one discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBaseRow {
    pub discipline: Discipline,
    /// Currency per unit of area.
    pub base_rate: f64,
    pub unit_type: UnitType,
    /// Minimum billable area, in `unit_type`.
    pub min_charge: f64,
    pub phase_weights: Vec<PhaseWeight>,
}

/// Per-item visualization prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationRates {
    pub man_view: f64,
    pub bird_view: f64,
    pub animation_per_min: f64,
}

/// Complete rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTables {
    pub pricing_base: Vec<PricingBaseRow>,
    pub complexity_multiplier: BTreeMap<ComplexityClass, f64>,
    pub travel_tier: BTreeMap<u8, f64>,
    pub visualization_rates: VisualizationRates,
    #[serde(default = "default_engagement_activation_fee")]
    pub engagement_activation_fee: f64,
}

/// Problems found in a rate table. All of them are deployment defects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableValidationError {
    #[error("Duplicate pricing base row for discipline: {0}")]
    DuplicateDiscipline(Discipline),

    #[error("Missing pricing base for discipline: {0}")]
    MissingDiscipline(Discipline),

    #[error("Field '{field}' must be a non-negative number, got {value}")]
    InvalidAmount { field: String, value: f64 },

    #[error("Complexity multiplier for class {class:?} must be at least 1, got {value}")]
    MultiplierBelowOne { class: ComplexityClass, value: f64 },

    #[error("Phase '{phase}' of {discipline} has percentage {value} above 100")]
    PercentageOutOfRange {
        discipline: Discipline,
        phase: String,
        value: u8,
    },
}

static DEFAULT_TABLES: Lazy<PricingTables> = Lazy::new(|| {
    let split_phases = || {
        vec![
            PhaseWeight::new("Conceptual & Schematic", 35, Scope::Concept),
            PhaseWeight::new("DED", 65, Scope::Ded),
        ]
    };

    PricingTables {
        pricing_base: vec![
            PricingBaseRow {
                discipline: Discipline::Planning,
                base_rate: 15_800_000.0,
                unit_type: UnitType::Ha,
                min_charge: 2.0,
                phase_weights: vec![
                    PhaseWeight::new("Diagnostic", 15, Scope::Diagnostic),
                    PhaseWeight::new("Conceptual", 25, Scope::Concept),
                    PhaseWeight::new("Schematic", 60, Scope::Schematic),
                ],
            },
            PricingBaseRow {
                discipline: Discipline::Building,
                base_rate: 200_000.0,
                unit_type: UnitType::Sqm,
                min_charge: 100.0,
                phase_weights: split_phases(),
            },
            PricingBaseRow {
                discipline: Discipline::Landscape,
                base_rate: 50_000.0,
                unit_type: UnitType::Sqm,
                min_charge: 250.0,
                phase_weights: split_phases(),
            },
            PricingBaseRow {
                discipline: Discipline::Interior,
                base_rate: 150_000.0,
                unit_type: UnitType::Sqm,
                min_charge: 100.0,
                phase_weights: split_phases(),
            },
        ],
        complexity_multiplier: BTreeMap::from([
            (ComplexityClass::A, 1.0),
            (ComplexityClass::B, 1.15),
            (ComplexityClass::C, 1.3),
        ]),
        travel_tier: BTreeMap::from([
            (0, 0.0),
            (1, 19_000_000.0),
            (2, 28_000_000.0),
            (3, 43_000_000.0),
        ]),
        visualization_rates: VisualizationRates {
            man_view: 2_900_000.0,
            bird_view: 4_800_000.0,
            animation_per_min: 950_000.0,
        },
        engagement_activation_fee: DEFAULT_ENGAGEMENT_ACTIVATION_FEE,
    }
});

impl PricingTables {
    /// Built-in studio rates.
    pub fn defaults() -> &'static PricingTables {
        &DEFAULT_TABLES
    }

    /// Rate row for a discipline, if configured.
    pub fn row_for(&self, discipline: Discipline) -> Option<&PricingBaseRow> {
        self.pricing_base.iter().find(|row| row.discipline == discipline)
    }

    /// Complexity multiplier for a class; 1 when the class is not configured.
    pub fn multiplier_for(&self, class: ComplexityClass) -> f64 {
        self.complexity_multiplier.get(&class).copied().unwrap_or(1.0)
    }

    /// Flat travel cost for a tier; 0 for unknown tiers.
    pub fn travel_cost(&self, tier: u8) -> f64 {
        self.travel_tier.get(&tier).copied().unwrap_or(0.0)
    }

    /// Checks the table is complete and internally consistent.
    pub fn validate(&self) -> Result<(), TableValidationError> {
        for (i, row) in self.pricing_base.iter().enumerate() {
            if self.pricing_base[..i]
                .iter()
                .any(|earlier| earlier.discipline == row.discipline)
            {
                return Err(TableValidationError::DuplicateDiscipline(row.discipline));
            }

            check_amount(&format!("{}.base_rate", row.discipline), row.base_rate)?;
            check_amount(&format!("{}.min_charge", row.discipline), row.min_charge)?;

            if let Some(phase) = row.phase_weights.iter().find(|p| p.percentage.value() > 100) {
                return Err(TableValidationError::PercentageOutOfRange {
                    discipline: row.discipline,
                    phase: phase.phase.clone(),
                    value: phase.percentage.value(),
                });
            }
        }

        if let Some(missing) = Discipline::all()
            .iter()
            .find(|d| self.row_for(**d).is_none())
        {
            return Err(TableValidationError::MissingDiscipline(*missing));
        }

        for (class, value) in &self.complexity_multiplier {
            if !value.is_finite() || *value < 1.0 {
                return Err(TableValidationError::MultiplierBelowOne {
                    class: *class,
                    value: *value,
                });
            }
        }

        for (tier, cost) in &self.travel_tier {
            check_amount(&format!("travelTier.{}", tier), *cost)?;
        }

        check_amount("visualizationRates.manView", self.visualization_rates.man_view)?;
        check_amount("visualizationRates.birdView", self.visualization_rates.bird_view)?;
        check_amount(
            "visualizationRates.animationPerMin",
            self.visualization_rates.animation_per_min,
        )?;
        check_amount("engagementActivationFee", self.engagement_activation_fee)?;

        Ok(())
    }
}

fn check_amount(field: &str, value: f64) -> Result<(), TableValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TableValidationError::InvalidAmount {
            field: field.to_string(),
            value,
        })
    }
}
