//! Pricing module - the fee engine.
//!
//! `ProposalCalculator::compute` maps a `ProposalInput` and a `PricingTables`
//! rate table to a fully itemized `ProposalOutput`. It is pure and stateless:
//! no I/O, no caching, identical inputs give identical outputs. Everything
//! that needs I/O (rate loading, persistence, rendering) lives behind ports.

mod calculator;
mod catalog;
mod input;
mod output;
mod staffing;
mod tables;

pub use calculator::{
    PricingError, ProposalCalculator, CONCEPT_SCHEMATIC_PHASE, DED_PHASE,
    MIN_ANIMATION_MINUTES, NOTE_ANIMATION_MINIMUM, NOTE_AREA_REQUIRED, NOTE_DED_EXCLUDED,
};
pub use catalog::{
    scope_options, ComplexityClass, Discipline, Doctrine, Scope, UnitType, INSTITUTIONAL_CLIENT,
};
pub use input::{ProposalInput, VisualizationRequest};
pub use output::{PhaseAmount, ProposalOutput};
pub use staffing::TeamAllocation;
pub use tables::{
    PhaseWeight, PricingBaseRow, PricingTables, TableValidationError, VisualizationRates,
    DEFAULT_ENGAGEMENT_ACTIVATION_FEE,
};
