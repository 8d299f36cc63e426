//! Field edits applied by the proposal form, with the coupling rules between fields.

use crate::domain::pricing::{
    ComplexityClass, Discipline, ProposalInput, Scope, INSTITUTIONAL_CLIENT,
};

/// Visualization deliverable being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationField {
    ManView,
    BirdView,
    AnimationMin,
}

/// A single field change from the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEdit {
    ProjectName(String),
    ClientName(String),
    ClientType(String),
    Discipline(Discipline),
    AreaHa(f64),
    AreaSqm(f64),
    Scope(Scope),
    ComplexityClass(ComplexityClass),
    Visualization(VisualizationField, f64),
    TravelTier(u8),
    EngagementActivation(bool),
}

impl ProposalInput {
    /// Returns a copy of this input with `edit` applied.
    ///
    /// Coupled fields are adjusted along the way:
    /// - an institutional planning engagement always carries activation;
    /// - changing discipline moves the scope to one the discipline offers;
    /// - a positive area in one unit clears the other unit.
    pub fn apply(&self, edit: InputEdit) -> ProposalInput {
        let mut next = self.clone();

        match edit {
            InputEdit::ProjectName(name) => next.project_name = name,
            InputEdit::ClientName(name) => next.client_name = name,
            InputEdit::ClientType(client_type) => {
                if client_type == INSTITUTIONAL_CLIENT && next.discipline == Discipline::Planning {
                    next.engagement_activation = true;
                }
                next.client_type = client_type;
            }
            InputEdit::Discipline(discipline) => {
                next.discipline = discipline;
                if !discipline.allows(next.scope) {
                    next.scope = discipline.allowed_scopes()[0];
                }
                if discipline == Discipline::Planning {
                    next.engagement_activation = true;
                }
            }
            InputEdit::AreaHa(value) => {
                if value > 0.0 {
                    next.area_sqm = 0.0;
                }
                next.area_ha = normalize_hectares(value);
            }
            InputEdit::AreaSqm(value) => {
                if value > 0.0 {
                    next.area_ha = 0.0;
                }
                next.area_sqm = normalize_whole(value);
            }
            InputEdit::Scope(scope) => next.scope = scope,
            InputEdit::ComplexityClass(class) => next.complexity_class = class,
            InputEdit::Visualization(field, value) => {
                let value = normalize_whole(value);
                match field {
                    VisualizationField::ManView => next.visualization.man_view = value as u32,
                    VisualizationField::BirdView => next.visualization.bird_view = value as u32,
                    VisualizationField::AnimationMin => next.visualization.animation_min = value,
                }
            }
            InputEdit::TravelTier(tier) => next.travel_tier = tier,
            InputEdit::EngagementActivation(on) => next.engagement_activation = on,
        }

        next
    }
}

/// Non-negative, two decimal places. Non-finite input becomes 0.
fn normalize_hectares(value: f64) -> f64 {
    if value.is_finite() {
        ((value * 100.0).round() / 100.0).max(0.0)
    } else {
        0.0
    }
}

/// Non-negative whole number. Non-finite input becomes 0.
fn normalize_whole(value: f64) -> f64 {
    if value.is_finite() {
        value.trunc().max(0.0)
    } else {
        0.0
    }
}
