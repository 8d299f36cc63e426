//! Project parameters a proposal is priced from.

use serde::{Deserialize, Serialize};

use super::catalog::{ComplexityClass, Discipline, Scope, UnitType};

/// Requested visualization deliverables.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationRequest {
    /// Eye-level perspective renders.
    pub man_view: u32,
    /// Aerial renders.
    pub bird_view: u32,
    /// Requested animation length in minutes.
    pub animation_min: f64,
}

impl VisualizationRequest {
    pub fn is_empty(&self) -> bool {
        self.man_view == 0 && self.bird_view == 0 && self.animation_min <= 0.0
    }
}

/// One set of project parameters.
///
/// Callers keep at most one of `area_ha` / `area_sqm` nonzero; the engine
/// reads whichever matches the discipline's unit and ignores the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalInput {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub client_name: String,
    /// Free-form. Only `institutional` has an effect, and only for planning.
    #[serde(default)]
    pub client_type: String,
    pub discipline: Discipline,
    #[serde(default)]
    pub area_ha: f64,
    #[serde(default)]
    pub area_sqm: f64,
    pub scope: Scope,
    pub complexity_class: ComplexityClass,
    #[serde(default)]
    pub visualization: VisualizationRequest,
    #[serde(default)]
    pub travel_tier: u8,
    #[serde(default)]
    pub engagement_activation: bool,
}

impl ProposalInput {
    /// Area in the given unit.
    pub fn area_in(&self, unit: UnitType) -> f64 {
        match unit {
            UnitType::Ha => self.area_ha,
            UnitType::Sqm => self.area_sqm,
        }
    }

    /// Area expressed in hectares, used for staffing heuristics.
    ///
    /// Planning reads `area_ha` directly; other disciplines convert `area_sqm`.
    pub fn hectare_equivalent(&self) -> f64 {
        match self.discipline {
            Discipline::Planning => self.area_ha,
            _ => self.area_sqm / 10_000.0,
        }
    }
}

impl Default for ProposalInput {
    /// The studio's reference engagement: a 100 ha institutional master plan.
    fn default() -> Self {
        Self {
            project_name: "SMK 1 Medan Renovation and Master Plan".to_string(),
            client_name: "Yayasan Pendidikan Telkom".to_string(),
            client_type: "institutional".to_string(),
            discipline: Discipline::Planning,
            area_ha: 100.0,
            area_sqm: 0.0,
            scope: Scope::Full,
            complexity_class: ComplexityClass::B,
            visualization: VisualizationRequest {
                man_view: 1,
                bird_view: 1,
                animation_min: 3.0,
            },
            travel_tier: 1,
            engagement_activation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case_payload() {
        let input: ProposalInput = serde_json::from_value(json!({
            "projectName": "Civic Plaza",
            "clientName": "Pemkot",
            "clientType": "government",
            "discipline": "building",
            "areaHa": 0,
            "areaSqm": 1200,
            "scope": "schematic",
            "complexityClass": "A",
            "visualization": { "manView": 2, "birdView": 0, "animationMin": 1.5 },
            "travelTier": 2,
            "engagementActivation": false
        }))
        .unwrap();

        assert_eq!(input.discipline, Discipline::Building);
        assert_eq!(input.area_sqm, 1200.0);
        assert_eq!(input.visualization.man_view, 2);
        assert_eq!(input.visualization.animation_min, 1.5);
        assert_eq!(input.travel_tier, 2);
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let input: ProposalInput = serde_json::from_value(json!({
            "discipline": "planning",
            "areaHa": 10,
            "scope": "concept",
            "complexityClass": "B"
        }))
        .unwrap();

        assert!(input.project_name.is_empty());
        assert_eq!(input.area_sqm, 0.0);
        assert!(input.visualization.is_empty());
        assert_eq!(input.travel_tier, 0);
        assert!(!input.engagement_activation);
    }

    #[test]
    fn fractional_view_counts_are_rejected() {
        let result: Result<ProposalInput, _> = serde_json::from_value(json!({
            "discipline": "planning",
            "scope": "full",
            "complexityClass": "A",
            "visualization": { "manView": 1.5, "birdView": 0, "animationMin": 0 }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn area_in_reads_matching_unit() {
        let mut input = ProposalInput::default();
        input.area_sqm = 500.0;
        assert_eq!(input.area_in(UnitType::Ha), 100.0);
        assert_eq!(input.area_in(UnitType::Sqm), 500.0);
    }

    #[test]
    fn hectare_equivalent_converts_square_metres() {
        let mut input = ProposalInput::default();
        assert_eq!(input.hectare_equivalent(), 100.0);

        input.discipline = Discipline::Landscape;
        input.area_sqm = 25_000.0;
        assert_eq!(input.hectare_equivalent(), 2.5);
    }

    #[test]
    fn default_is_reference_master_plan() {
        let input = ProposalInput::default();
        assert_eq!(input.discipline, Discipline::Planning);
        assert_eq!(input.scope, Scope::Full);
        assert_eq!(input.complexity_class, ComplexityClass::B);
        assert_eq!(input.visualization.animation_min, 3.0);
        assert!(input.engagement_activation);
    }
}
