//! Content rules for exported proposal documents.

use crate::domain::pricing::{Discipline, ProposalInput};

pub const PROJECT_NAME_REQUIRED: &str = "Project name is required.";
pub const AREA_REQUIRED: &str = "Enter either Area (ha) or Area (sqm).";

/// Checks an input is complete enough to put in front of a client.
///
/// Returns every problem found; an empty list means the input may be exported.
pub fn validate_for_export(input: &ProposalInput) -> Vec<String> {
    let mut errors = Vec::new();
    if input.project_name.trim().is_empty() {
        errors.push(PROJECT_NAME_REQUIRED.to_string());
    }
    if input.area_ha <= 0.0 && input.area_sqm <= 0.0 {
        errors.push(AREA_REQUIRED.to_string());
    }
    errors
}

/// Deliverables listed under "Scope of Works".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSection {
    pub included: Vec<String>,
    pub excluded: Vec<String>,
}

impl ScopeSection {
    pub fn for_input(input: &ProposalInput) -> Self {
        match input.discipline {
            Discipline::Planning => Self {
                included: to_strings(&[
                    "Illustrative Master Plan",
                    "Development Summary",
                    "Land Use Plan",
                    "Circulation & Access Logic",
                    "Phasing Framework",
                    "Open Space & Landscape Framework",
                    "Schematic Master Plan (CAD)",
                    "Lot configuration",
                    "Conceptual street sections",
                ]),
                excluded: to_strings(&[
                    "Architecture",
                    "Interior Design",
                    "DED Engineering",
                    "BOQ",
                    "Construction documentation",
                ]),
            },
            _ => Self {
                included: vec![
                    format!(
                        "{} scope based on selected endpoint ({})",
                        input.discipline.as_str().to_uppercase(),
                        input.scope.as_str().to_uppercase()
                    ),
                    "Conceptual and schematic package per doctrine".to_string(),
                    "Technical documentation according to selected stage".to_string(),
                ],
                excluded: to_strings(&[
                    "Out-of-scope specialist studies unless separately commissioned",
                ]),
            },
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// File name for a downloaded proposal.
///
/// The project name is lower-cased, whitespace runs become `-` and every
/// character outside `[a-z0-9._-]` is dropped, so the result is safe inside a
/// quoted `Content-Disposition` value. Falls back to `proposal`.
pub fn export_filename(project_name: &str, extension: &str) -> String {
    let mut slug = String::with_capacity(project_name.len());
    for c in project_name.to_lowercase().chars() {
        let mapped = match c {
            'a'..='z' | '0'..='9' | '.' | '_' => c,
            '-' => '-',
            c if c.is_whitespace() => '-',
            _ => continue,
        };
        if mapped == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(mapped);
    }

    let stem = slug.trim_matches(|c: char| c == '-' || c == '.');
    let stem = if stem.is_empty() { "proposal" } else { stem };
    format!("{}.{}", stem, extension)
}
