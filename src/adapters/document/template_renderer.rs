//! Fixed-template Markdown rendering of a priced proposal.

use crate::domain::foundation::{format_idr, Timestamp};
use crate::domain::pricing::{ProposalInput, ProposalOutput};
use crate::domain::proposal::{validate_for_export, ScopeSection};
use crate::ports::{ProposalRenderer, RenderError};

const INTRODUCTION: [&str; 2] = [
    "Berdasarkan hasil pertemuan, dibahas perlunya model kerja strategis berskala nasional yang memungkinkan HDA mendukung YPT dalam proses perencanaan dan desain di berbagai lokasi sekolah dan kampus di seluruh Indonesia.",
    "Program Perencanaan dan Desain Nasional YPT disusun untuk menyatukan proses asesmen, perencanaan, dan desain dalam satu sistem koordinasi nasional.",
];

const SCOPE_PREAMBLE: &str = "Dukungan HDA mencakup aset pendidikan YPT dari sekolah hingga perguruan tinggi di berbagai provinsi dan kota di Indonesia.";

const PAYMENT_TERMS: [&str; 3] = [
    "Termin 1: 30% (Down Payment)",
    "Termin 2: 40% (Interim Submission)",
    "Termin 3: 30% (Final Submission)",
];

const EXCLUSIONS: [&str; 2] = [
    "Architecture, Interior Design, DED Engineering, BOQ, and construction documentation are excluded from master planning package.",
    "Additional specialist studies are excluded unless separately commissioned.",
];

const TERMS: [&str; 2] = [
    "Proposal validity: 30 days from issuance.",
    "Major scope changes may require addendum.",
];

const SIGNATORY: [&str; 2] = ["PT Harmoni Desain Ananta (HDA + AIM)", "Principal"];

/// Renders the studio's standard proposal layout.
#[derive(Debug, Clone, Default)]
pub struct TemplateProposalRenderer;

impl TemplateProposalRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ProposalRenderer for TemplateProposalRenderer {
    fn render_markdown(
        &self,
        input: &ProposalInput,
        output: &ProposalOutput,
        issued_on: &Timestamp,
    ) -> Result<String, RenderError> {
        let problems = validate_for_export(input);
        if !problems.is_empty() {
            return Err(RenderError::IncompleteInput(problems));
        }

        let scope = ScopeSection::for_input(input);
        let client = if input.client_name.trim().is_empty() {
            "N/A"
        } else {
            input.client_name.as_str()
        };

        let mut lines: Vec<String> = vec![
            "# Proposal".into(),
            String::new(),
            "## Cover Page".into(),
            format!("- Project Name: {}", input.project_name),
            format!("- Client Name: {}", client),
            format!("- Date: {}", issued_on.issue_date()),
            String::new(),
            "## Introduction".into(),
        ];
        lines.extend(INTRODUCTION.iter().map(|s| s.to_string()));

        lines.push(String::new());
        lines.push("## Scope of Works".into());
        lines.push(SCOPE_PREAMBLE.into());
        lines.push("### Included".into());
        lines.extend(bullets(&scope.included));
        lines.push("### Excluded".into());
        lines.extend(bullets(&scope.excluded));

        lines.push(String::new());
        lines.push("## Fee Structure".into());
        for (label, amount) in [
            ("Base Fee", output.base_fee),
            ("Complexity Adjustment", output.complexity_adjustment),
            ("Engagement Activation", output.engagement_cost),
            ("Travel Cost", output.travel_cost),
            ("Visualization Fees", output.visualization_cost),
            ("Total Fee", output.total_fee),
        ] {
            lines.push(format!("- {}: {}", label, format_idr(amount as f64)));
        }

        lines.push(String::new());
        lines.push("## Phase Breakdown".into());
        lines.extend(output.phase_breakdown.iter().map(|p| {
            format!("- {} ({}): {}", p.phase, p.percentage, format_idr(p.amount as f64))
        }));

        lines.push(String::new());
        lines.push("## Duration Estimate".into());
        lines.push(format!("- {} months", output.duration_months));

        section(&mut lines, "Payment Structure", &PAYMENT_TERMS);
        section(&mut lines, "Exclusions", &EXCLUSIONS);
        section(&mut lines, "Terms & Conditions", &TERMS);

        lines.push(String::new());
        lines.push("## Signature Block".into());
        lines.extend(SIGNATORY.iter().map(|s| s.to_string()));

        Ok(lines.join("\n"))
    }
}

fn bullets(items: &[String]) -> impl Iterator<Item = String> + '_ {
    items.iter().map(|item| format!("- {}", item))
}

fn section(lines: &mut Vec<String>, title: &str, items: &[&str]) {
    lines.push(String::new());
    lines.push(format!("## {}", title));
    lines.extend(items.iter().map(|item| format!("- {}", item)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::{Discipline, PricingTables, ProposalCalculator, Scope};
    use chrono::{TimeZone, Utc};

    fn issued() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap())
    }

    fn render(input: &ProposalInput) -> Result<String, RenderError> {
        let output = ProposalCalculator::compute(input, PricingTables::defaults()).unwrap();
        TemplateProposalRenderer::new().render_markdown(input, &output, &issued())
    }

    #[test]
    fn renders_cover_page_and_date() {
        let markdown = render(&ProposalInput::default()).unwrap();
        assert!(markdown.starts_with("# Proposal\n\n## Cover Page\n"));
        assert!(markdown.contains("- Project Name: SMK 1 Medan Renovation and Master Plan"));
        assert!(markdown.contains("- Client Name: Yayasan Pendidikan Telkom"));
        assert!(markdown.contains("- Date: 05 March 2025"));
    }

    #[test]
    fn renders_fee_lines_in_rupiah() {
        let markdown = render(&ProposalInput::default()).unwrap();
        assert!(markdown.contains("- Base Fee: Rp 1.580.000.000"));
        assert!(markdown.contains("- Complexity Adjustment: Rp 237.000.000"));
        assert!(markdown.contains("- Engagement Activation: Rp 26.800.000"));
        assert!(markdown.contains("- Total Fee: Rp 1.873.350.000"));
    }

    #[test]
    fn renders_phase_breakdown_and_duration() {
        let markdown = render(&ProposalInput::default()).unwrap();
        assert!(markdown.contains("- Diagnostic (15%): Rp 272.550.000"));
        assert!(markdown.contains("- Schematic (60%): Rp 1.090.200.000"));
        assert!(markdown.contains("## Duration Estimate\n- 8 months"));
    }

    #[test]
    fn renders_standing_sections_in_order() {
        let markdown = render(&ProposalInput::default()).unwrap();
        let order = [
            "## Introduction",
            "## Scope of Works",
            "## Fee Structure",
            "## Phase Breakdown",
            "## Duration Estimate",
            "## Payment Structure",
            "## Exclusions",
            "## Terms & Conditions",
            "## Signature Block",
        ];
        let positions: Vec<usize> = order.iter().map(|h| markdown.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(markdown.contains("- Termin 2: 40% (Interim Submission)"));
        assert!(markdown.ends_with("PT Harmoni Desain Ananta (HDA + AIM)\nPrincipal"));
    }

    #[test]
    fn non_planning_scope_names_endpoint() {
        let input = ProposalInput {
            discipline: Discipline::Building,
            area_ha: 0.0,
            area_sqm: 200.0,
            scope: Scope::Schematic,
            ..ProposalInput::default()
        };
        let markdown = render(&input).unwrap();
        assert!(markdown.contains("- BUILDING scope based on selected endpoint (SCHEMATIC)"));
        assert!(markdown.contains("- Conceptual & Schematic (35%): Rp "));
        assert!(!markdown.contains("Illustrative Master Plan"));
    }

    #[test]
    fn blank_client_renders_placeholder() {
        let input = ProposalInput {
            client_name: String::new(),
            ..ProposalInput::default()
        };
        assert!(render(&input).unwrap().contains("- Client Name: N/A"));
    }

    #[test]
    fn incomplete_input_is_refused() {
        let input = ProposalInput {
            project_name: String::new(),
            ..ProposalInput::default()
        };
        assert_eq!(
            render(&input),
            Err(RenderError::IncompleteInput(vec!["Project name is required.".to_string()]))
        );
    }
}
