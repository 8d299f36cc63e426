//! Fixed vocabulary of the pricing engine: disciplines, scopes, complexity
//! classes, area units and doctrine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Professional service category. Selects the rate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Planning,
    Building,
    Landscape,
    Interior,
}

impl Discipline {
    pub fn all() -> &'static [Discipline] {
        &[
            Discipline::Planning,
            Discipline::Building,
            Discipline::Landscape,
            Discipline::Interior,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Planning => "planning",
            Discipline::Building => "building",
            Discipline::Landscape => "landscape",
            Discipline::Interior => "interior",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Discipline::Planning => "Master Planning",
            Discipline::Building => "Building",
            Discipline::Landscape => "Landscape",
            Discipline::Interior => "Interior",
        }
    }

    /// Scopes that may be quoted for this discipline, in form order.
    ///
    /// Master planning offers every stage; the other disciplines start at
    /// concept.
    pub fn allowed_scopes(&self) -> &'static [Scope] {
        match self {
            Discipline::Planning => Scope::all(),
            Discipline::Building | Discipline::Landscape | Discipline::Interior => &[
                Scope::Concept,
                Scope::Schematic,
                Scope::Ded,
                Scope::Full,
            ],
        }
    }

    pub fn allows(&self, scope: Scope) -> bool {
        self.allowed_scopes().contains(&scope)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Discipline::all()
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("discipline", format!("unknown discipline '{}'", s)))
    }
}

/// Depth of work requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Diagnostic,
    Concept,
    Schematic,
    Ded,
    Full,
}

impl Scope {
    pub fn all() -> &'static [Scope] {
        &[
            Scope::Diagnostic,
            Scope::Concept,
            Scope::Schematic,
            Scope::Ded,
            Scope::Full,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Diagnostic => "diagnostic",
            Scope::Concept => "concept",
            Scope::Schematic => "schematic",
            Scope::Ded => "ded",
            Scope::Full => "full",
        }
    }

    /// Estimated engagement length in months. Independent of discipline and area.
    pub fn duration_months(&self) -> u32 {
        match self {
            Scope::Diagnostic => 2,
            Scope::Concept => 4,
            Scope::Schematic => 8,
            Scope::Ded => 10,
            Scope::Full => 8,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Site complexity grade. Only priced for master planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComplexityClass {
    A,
    B,
    C,
}

impl ComplexityClass {
    pub fn all() -> &'static [ComplexityClass] {
        &[ComplexityClass::A, ComplexityClass::B, ComplexityClass::C]
    }
}

/// Unit a discipline's area is measured and billed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Ha,
    Sqm,
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitType::Ha => f.write_str("ha"),
            UnitType::Sqm => f.write_str("sqm"),
        }
    }
}

/// Engagement classification surfaced on the output for document rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Doctrine {
    Institutional,
    Standard,
}

/// Client type that marks an institutional engagement.
pub const INSTITUTIONAL_CLIENT: &str = "institutional";

impl Doctrine {
    /// Institutional only for master planning for an institutional client.
    pub fn classify(discipline: Discipline, client_type: &str) -> Self {
        if discipline == Discipline::Planning && client_type == INSTITUTIONAL_CLIENT {
            Doctrine::Institutional
        } else {
            Doctrine::Standard
        }
    }
}

/// Allowed scopes keyed by discipline, as offered to form clients.
pub fn scope_options() -> BTreeMap<Discipline, Vec<Scope>> {
    Discipline::all()
        .iter()
        .map(|d| (*d, d.allowed_scopes().to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planning_allows_every_scope() {
        assert_eq!(Discipline::Planning.allowed_scopes(), Scope::all());
    }

    #[test]
    fn other_disciplines_start_at_concept() {
        for d in [Discipline::Building, Discipline::Landscape, Discipline::Interior] {
            assert!(!d.allows(Scope::Diagnostic), "{} should not offer diagnostic", d);
            assert_eq!(d.allowed_scopes()[0], Scope::Concept);
            assert_eq!(d.allowed_scopes().len(), 4);
        }
    }

    #[test]
    fn duration_depends_only_on_scope() {
        let months: Vec<u32> = Scope::all().iter().map(|s| s.duration_months()).collect();
        assert_eq!(months, vec![2, 4, 8, 10, 8]);
    }

    #[test]
    fn doctrine_is_institutional_only_for_planning() {
        assert_eq!(
            Doctrine::classify(Discipline::Planning, "institutional"),
            Doctrine::Institutional
        );
        assert_eq!(
            Doctrine::classify(Discipline::Building, "institutional"),
            Doctrine::Standard
        );
        assert_eq!(
            Doctrine::classify(Discipline::Planning, "private"),
            Doctrine::Standard
        );
    }

    #[test]
    fn wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&Scope::Ded).unwrap(), "\"ded\"");
        assert_eq!(serde_json::to_string(&UnitType::Sqm).unwrap(), "\"sqm\"");
        assert_eq!(serde_json::to_string(&ComplexityClass::C).unwrap(), "\"C\"");
        let d: Discipline = serde_json::from_str("\"landscape\"").unwrap();
        assert_eq!(d, Discipline::Landscape);
    }

    #[test]
    fn discipline_parses_from_str() {
        assert_eq!("interior".parse::<Discipline>().unwrap(), Discipline::Interior);
        assert!("urban".parse::<Discipline>().is_err());
    }

    #[test]
    fn scope_options_serialize_as_object() {
        let json = serde_json::to_value(scope_options()).unwrap();
        assert_eq!(json["planning"].as_array().unwrap().len(), 5);
        assert_eq!(json["interior"][0], "concept");
    }
}
