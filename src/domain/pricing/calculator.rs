//! Fee computation: project input plus rate table in, itemized proposal out.

use thiserror::Error;

use super::catalog::{Discipline, Doctrine, Scope};
use super::input::ProposalInput;
use super::output::{to_currency, PhaseAmount, ProposalOutput};
use super::staffing::TeamAllocation;
use super::tables::{PricingBaseRow, PricingTables};
use crate::domain::foundation::Percentage;

/// Shortest animation that is billed, in minutes.
pub const MIN_ANIMATION_MINUTES: f64 = 3.0;

/// Phase label used for the concept and schematic stages outside master planning.
pub const CONCEPT_SCHEMATIC_PHASE: &str = "Conceptual & Schematic";
pub const DED_PHASE: &str = "DED";

const CONCEPT_SCHEMATIC_SHARE: Percentage = Percentage::new(35);
const DED_SHARE: Percentage = Percentage::new(65);

pub const NOTE_AREA_REQUIRED: &str = "Area must be greater than 0.";
pub const NOTE_ANIMATION_MINIMUM: &str = "Animation minimum of 3 minutes enforced";
pub const NOTE_DED_EXCLUDED: &str = "DED excluded from Master Planning package";

/// The rate table cannot price the request. A deployment defect, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Missing pricing base for discipline: {0}")]
    MissingPricingBase(Discipline),
}

/// Pure fee calculator. Holds no state; safe to call from any thread.
pub struct ProposalCalculator;

impl ProposalCalculator {
    /// Prices a proposal.
    ///
    /// Input problems never fail the call: a zero area yields a zero-valued
    /// proposal and every enforced floor or exclusion is reported in `notes`.
    ///
    /// # Errors
    ///
    /// `PricingError::MissingPricingBase` when `tables` has no row for the
    /// input's discipline.
    pub fn compute(
        input: &ProposalInput,
        tables: &PricingTables,
    ) -> Result<ProposalOutput, PricingError> {
        let row = tables
            .row_for(input.discipline)
            .ok_or(PricingError::MissingPricingBase(input.discipline))?;

        let doctrine = Doctrine::classify(input.discipline, &input.client_type);
        let duration_months = input.scope.duration_months();

        let area = input.area_in(row.unit_type);
        if area <= 0.0 {
            return Ok(Self::empty(doctrine, duration_months));
        }

        let mut notes = Vec::new();

        let billable_area = area.max(row.min_charge);
        if area < row.min_charge {
            notes.push(format!(
                "Minimum charge enforced: {} {}",
                row.min_charge, row.unit_type
            ));
        }

        let base_fee = billable_area * row.base_rate;

        let multiplier = match input.discipline {
            Discipline::Planning => tables.multiplier_for(input.complexity_class),
            _ => 1.0,
        };
        let adjusted_base = base_fee * multiplier;
        let complexity_adjustment = adjusted_base - base_fee;

        let travel_cost = tables.travel_cost(input.travel_tier);

        let requested_animation = input.visualization.animation_min;
        let billed_animation = if requested_animation > 0.0 {
            requested_animation.trunc().max(MIN_ANIMATION_MINUTES)
        } else {
            0.0
        };
        if requested_animation > 0.0 && requested_animation < MIN_ANIMATION_MINUTES {
            notes.push(NOTE_ANIMATION_MINIMUM.to_string());
        }

        let rates = &tables.visualization_rates;
        let visualization_cost = f64::from(input.visualization.man_view) * rates.man_view
            + f64::from(input.visualization.bird_view) * rates.bird_view
            + billed_animation * rates.animation_per_min;

        let engagement_cost = if input.engagement_activation {
            tables.engagement_activation_fee
        } else {
            0.0
        };

        let (subtotal, phase_breakdown) = match input.discipline {
            Discipline::Planning => {
                let scope = match input.scope {
                    Scope::Ded => {
                        notes.push(NOTE_DED_EXCLUDED.to_string());
                        Scope::Schematic
                    }
                    other => other,
                };
                (adjusted_base, Self::weighted_phases(row, scope, adjusted_base))
            }
            Discipline::Building | Discipline::Landscape | Discipline::Interior => {
                Self::split_phases(input.scope, base_fee)
            }
        };

        let total_fee = to_currency(subtotal + travel_cost + visualization_cost + engagement_cost);

        Ok(ProposalOutput {
            doctrine,
            base_fee: to_currency(base_fee),
            complexity_adjustment: to_currency(complexity_adjustment),
            travel_cost: to_currency(travel_cost),
            visualization_cost: to_currency(visualization_cost),
            engagement_cost: to_currency(engagement_cost),
            subtotal: to_currency(subtotal),
            total_fee,
            billable_area,
            phase_breakdown,
            notes,
            suggested_team_allocation: TeamAllocation::suggest(
                input.discipline,
                input.hectare_equivalent(),
            ),
            duration_months,
        })
    }

    fn empty(doctrine: Doctrine, duration_months: u32) -> ProposalOutput {
        ProposalOutput {
            doctrine,
            base_fee: 0,
            complexity_adjustment: 0,
            travel_cost: 0,
            visualization_cost: 0,
            engagement_cost: 0,
            subtotal: 0,
            total_fee: 0,
            billable_area: 0.0,
            phase_breakdown: Vec::new(),
            notes: vec![NOTE_AREA_REQUIRED.to_string()],
            suggested_team_allocation: TeamAllocation::MINIMAL,
            duration_months,
        }
    }

    /// Table-driven phases: rows matching `scope`, or every row for a full engagement.
    fn weighted_phases(row: &PricingBaseRow, scope: Scope, subtotal: f64) -> Vec<PhaseAmount> {
        row.phase_weights
            .iter()
            .filter(|weight| scope == Scope::Full || weight.scope == scope)
            .map(|weight| PhaseAmount {
                phase: weight.phase.clone(),
                percentage: weight.percentage,
                amount: to_currency(weight.percentage.of(subtotal)),
            })
            .collect()
    }

    /// Two billing tiers: concept/schematic bills 35% of the base fee,
    /// anything further bills the whole base fee split 35/65.
    ///
    /// Shares are applied as `base_fee * 0.35` and `base_fee * 0.65`; scaling
    /// by 35 then dividing by 100 rounds differently on fractional areas.
    fn split_phases(scope: Scope, base_fee: f64) -> (f64, Vec<PhaseAmount>) {
        let concept = PhaseAmount {
            phase: CONCEPT_SCHEMATIC_PHASE.to_string(),
            percentage: CONCEPT_SCHEMATIC_SHARE,
            amount: to_currency(base_fee * CONCEPT_SCHEMATIC_SHARE.as_fraction()),
        };

        match scope {
            Scope::Concept | Scope::Schematic => {
                let subtotal = concept.amount as f64;
                (subtotal, vec![concept])
            }
            _ => {
                let ded = PhaseAmount {
                    phase: DED_PHASE.to_string(),
                    percentage: DED_SHARE,
                    amount: to_currency(base_fee * DED_SHARE.as_fraction()),
                };
                (base_fee, vec![concept, ded])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::catalog::ComplexityClass;

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn tables() -> &'static PricingTables {
        PricingTables::defaults()
    }

    fn planning(area_ha: f64, scope: Scope) -> ProposalInput {
        ProposalInput {
            area_ha,
            scope,
            travel_tier: 0,
            engagement_activation: false,
            visualization: Default::default(),
            ..ProposalInput::default()
        }
    }

    fn building(area_sqm: f64, scope: Scope) -> ProposalInput {
        ProposalInput {
            discipline: Discipline::Building,
            client_type: "private".to_string(),
            area_ha: 0.0,
            area_sqm,
            scope,
            travel_tier: 0,
            engagement_activation: false,
            visualization: Default::default(),
            ..ProposalInput::default()
        }
    }

    fn compute(input: &ProposalInput) -> ProposalOutput {
        ProposalCalculator::compute(input, tables()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Reference engagement
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn prices_default_master_plan() {
        let output = compute(&ProposalInput::default());

        assert_eq!(output.doctrine, Doctrine::Institutional);
        assert_eq!(output.billable_area, 100.0);
        assert_eq!(output.base_fee, 1_580_000_000);
        assert_eq!(output.complexity_adjustment, 237_000_000);
        assert_eq!(output.subtotal, 1_817_000_000);
        assert_eq!(output.travel_cost, 19_000_000);
        assert_eq!(output.visualization_cost, 10_550_000);
        assert_eq!(output.engagement_cost, 26_800_000);
        assert_eq!(output.total_fee, 1_873_350_000);
        assert!(output.notes.is_empty());
        assert_eq!(output.duration_months, 8);
        assert_eq!(
            output.suggested_team_allocation,
            TeamAllocation { snr: 1, mid: 2, jnr: 2 }
        );

        let amounts: Vec<i64> = output.phase_breakdown.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![272_550_000, 454_250_000, 1_090_200_000]);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Area floor
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn zero_area_short_circuits() {
        let mut input = ProposalInput::default();
        input.area_ha = 0.0;
        input.scope = Scope::Ded;

        let output = compute(&input);

        assert_eq!(output.total_fee, 0);
        assert_eq!(output.travel_cost, 0);
        assert_eq!(output.visualization_cost, 0);
        assert_eq!(output.engagement_cost, 0);
        assert!(output.phase_breakdown.is_empty());
        assert_eq!(output.notes, vec![NOTE_AREA_REQUIRED.to_string()]);
        assert_eq!(output.suggested_team_allocation, TeamAllocation::MINIMAL);
        assert_eq!(output.duration_months, 10);
        assert_eq!(output.doctrine, Doctrine::Institutional);
    }

    #[test]
    fn building_reads_square_metres_not_hectares() {
        let mut input = building(0.0, Scope::Full);
        input.area_ha = 50.0;
        let output = compute(&input);
        assert_eq!(output.total_fee, 0);
        assert_eq!(output.notes[0], NOTE_AREA_REQUIRED);
    }

    #[test]
    fn minimum_charge_raises_billable_area() {
        let output = compute(&planning(1.5, Scope::Full));
        assert_eq!(output.billable_area, 2.0);
        assert_eq!(output.base_fee, 31_600_000);
        assert_eq!(output.notes, vec!["Minimum charge enforced: 2 ha".to_string()]);

        let output = compute(&building(40.0, Scope::Full));
        assert_eq!(output.billable_area, 100.0);
        assert!(output.notes.iter().any(|n| n == "Minimum charge enforced: 100 sqm"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Complexity, travel, visualization, engagement
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn complexity_c_costs_more_than_a() {
        let mut a = planning(80.0, Scope::Full);
        a.complexity_class = ComplexityClass::A;
        let mut c = a.clone();
        c.complexity_class = ComplexityClass::C;

        let out_a = compute(&a);
        let out_c = compute(&c);

        assert_eq!(out_a.complexity_adjustment, 0);
        assert!(out_c.complexity_adjustment > 0);
        assert!(out_c.subtotal > out_a.subtotal);
    }

    #[test]
    fn complexity_ignored_outside_planning() {
        let mut input = building(1_000.0, Scope::Full);
        input.complexity_class = ComplexityClass::C;
        let output = compute(&input);
        assert_eq!(output.complexity_adjustment, 0);
        assert_eq!(output.subtotal, output.base_fee);
    }

    #[test]
    fn absent_complexity_class_defaults_to_one() {
        let mut tables = tables().clone();
        tables.complexity_multiplier.clear();
        let output = ProposalCalculator::compute(&ProposalInput::default(), &tables).unwrap();
        assert_eq!(output.complexity_adjustment, 0);
        assert_eq!(output.subtotal, output.base_fee);
    }

    #[test]
    fn travel_uses_tier_constant() {
        let mut input = planning(10.0, Scope::Concept);
        input.travel_tier = 2;
        assert_eq!(compute(&input).travel_cost, 28_000_000);

        input.travel_tier = 7;
        assert_eq!(compute(&input).travel_cost, 0);
    }

    #[test]
    fn short_animation_bills_three_minutes() {
        let mut input = planning(10.0, Scope::Concept);
        input.visualization.animation_min = 2.0;

        let output = compute(&input);

        assert_eq!(output.visualization_cost, 3 * 950_000);
        assert!(output.notes.iter().any(|n| n == NOTE_ANIMATION_MINIMUM));
    }

    #[test]
    fn fractional_animation_is_truncated() {
        let mut input = planning(10.0, Scope::Concept);
        input.visualization.animation_min = 4.8;
        assert_eq!(compute(&input).visualization_cost, 4 * 950_000);

        input.visualization.animation_min = 0.5;
        let output = compute(&input);
        assert_eq!(output.visualization_cost, 3 * 950_000);
        assert!(output.notes.iter().any(|n| n == NOTE_ANIMATION_MINIMUM));
    }

    #[test]
    fn views_are_priced_per_item() {
        let mut input = building(500.0, Scope::Concept);
        input.visualization.man_view = 2;
        input.visualization.bird_view = 3;
        assert_eq!(
            compute(&input).visualization_cost,
            2 * 2_900_000 + 3 * 4_800_000
        );
    }

    #[test]
    fn engagement_fee_comes_from_table() {
        let mut input = planning(10.0, Scope::Concept);
        input.engagement_activation = true;
        assert_eq!(compute(&input).engagement_cost, 26_800_000);

        let mut tables = tables().clone();
        tables.engagement_activation_fee = 30_000_000.0;
        let output = ProposalCalculator::compute(&input, &tables).unwrap();
        assert_eq!(output.engagement_cost, 30_000_000);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Phase breakdown
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn planning_concept_has_single_conceptual_phase() {
        let output = compute(&planning(100.0, Scope::Concept));
        assert_eq!(output.phase_breakdown.len(), 1);
        assert!(output.phase_breakdown[0].phase.contains("Concept"));
        assert_eq!(output.phase_breakdown[0].percentage.value(), 25);
    }

    #[test]
    fn planning_ded_is_priced_as_schematic() {
        let ded = compute(&planning(100.0, Scope::Ded));
        let schematic = compute(&planning(100.0, Scope::Schematic));

        assert!(ded.notes.iter().any(|n| n.contains("DED excluded")));
        assert_eq!(ded.phase_breakdown, schematic.phase_breakdown);
        assert_eq!(ded.phase_breakdown[0].phase, "Schematic");
        assert_eq!(ded.duration_months, 10);
    }

    #[test]
    fn planning_subtotal_is_not_reduced_by_scope() {
        let concept = compute(&planning(100.0, Scope::Concept));
        let full = compute(&planning(100.0, Scope::Full));
        assert_eq!(concept.subtotal, full.subtotal);
    }

    #[test]
    fn building_schematic_bills_thirty_five_percent() {
        let output = compute(&building(200.0, Scope::Schematic));

        assert_eq!(output.base_fee, 40_000_000);
        assert_eq!(output.subtotal, 14_000_000);
        assert_eq!(output.phase_breakdown.len(), 1);
        assert_eq!(output.phase_breakdown[0].phase, CONCEPT_SCHEMATIC_PHASE);
        assert_eq!(output.phase_breakdown[0].percentage.value(), 35);
        assert_eq!(output.phase_breakdown[0].amount, 14_000_000);
    }

    #[test]
    fn building_ded_bills_full_base() {
        let output = compute(&building(200.0, Scope::Ded));

        assert_eq!(output.subtotal, 40_000_000);
        assert_eq!(output.phase_breakdown.len(), 2);
        assert_eq!(output.phase_breakdown[1].phase, DED_PHASE);
        assert_eq!(output.phase_breakdown[1].percentage.value(), 65);
        assert_eq!(output.phase_breakdown[1].amount, 26_000_000);
    }

    #[test]
    fn split_shares_apply_decimal_multipliers() {
        let input = ProposalInput {
            discipline: Discipline::Landscape,
            ..building(258.1122, Scope::Ded)
        };
        let base_fee: f64 = 258.1122 * 50_000.0;

        let output = compute(&input);

        assert_eq!(output.phase_breakdown[1].amount, 8_388_647);
        assert_eq!(output.phase_breakdown[1].amount, (base_fee * 0.65).round() as i64);
        assert_eq!(output.phase_breakdown[0].amount, (base_fee * 0.35).round() as i64);
    }

    #[test]
    fn concept_subtotal_is_rounded_decimal_share() {
        let input = ProposalInput {
            discipline: Discipline::Landscape,
            ..building(258.1122, Scope::Concept)
        };
        let output = compute(&input);
        assert_eq!(output.subtotal, (258.1122_f64 * 50_000.0 * 0.35).round() as i64);
    }

    #[test]
    fn non_planning_full_matches_ded() {
        let full = compute(&building(750.0, Scope::Full));
        let ded = compute(&building(750.0, Scope::Ded));
        assert_eq!(full.phase_breakdown, ded.phase_breakdown);
        assert_eq!(full.subtotal, ded.subtotal);
        assert_ne!(full.duration_months, ded.duration_months);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Totals, staffing, errors
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn total_adds_every_component() {
        let mut input = building(1_000.0, Scope::Concept);
        input.travel_tier = 3;
        input.engagement_activation = true;
        input.visualization.man_view = 1;

        let output = compute(&input);

        assert_eq!(
            output.total_fee,
            output.subtotal + output.travel_cost + output.visualization_cost + output.engagement_cost
        );
    }

    #[test]
    fn staffing_uses_hectare_equivalent() {
        let output = compute(&building(3_500_000.0, Scope::Full));
        assert_eq!(
            output.suggested_team_allocation,
            TeamAllocation { snr: 1, mid: 1, jnr: 3 }
        );

        let output = compute(&planning(250.0, Scope::Full));
        assert_eq!(output.suggested_team_allocation.mid, 3);
    }

    #[test]
    fn landscape_and_interior_use_their_own_rates() {
        let mut input = building(1_000.0, Scope::Full);
        input.discipline = Discipline::Landscape;
        assert_eq!(compute(&input).base_fee, 50_000_000);

        input.discipline = Discipline::Interior;
        assert_eq!(compute(&input).base_fee, 150_000_000);
    }

    #[test]
    fn missing_row_is_configuration_error() {
        let mut tables = tables().clone();
        tables.pricing_base.retain(|row| row.discipline != Discipline::Landscape);

        let mut input = building(500.0, Scope::Full);
        input.discipline = Discipline::Landscape;

        let err = ProposalCalculator::compute(&input, &tables).unwrap_err();
        assert_eq!(err, PricingError::MissingPricingBase(Discipline::Landscape));
        assert_eq!(err.to_string(), "Missing pricing base for discipline: landscape");
    }

    #[test]
    fn identical_calls_give_identical_output() {
        let input = ProposalInput::default();
        assert_eq!(compute(&input), compute(&input));
    }
}
