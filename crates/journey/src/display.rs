//! Presentation model for a validation result: severity sections, fix
//! actions and a readiness badge, plus a plain-text rendering.

use std::fmt::Write as _;

use serde::Serialize;

use crate::types::{FindingType, JourneyValidationResult, Readiness, ValidationFinding};

/// Action a finding offers back to the journey builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum FixAction {
    FixError {
        finding_id: String,
        stage_id: Option<String>,
    },
    ConfigureStage {
        stage_id: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayItem {
    pub finding: ValidationFinding,
    pub actions: Vec<FixAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplaySection {
    pub finding_type: FindingType,
    pub heading: &'static str,
    pub color: &'static str,
    pub items: Vec<DisplayItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessBadge {
    pub readiness: Readiness,
    pub label: &'static str,
    pub color: &'static str,
}

/// Everything a validation panel needs to render one result.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDisplay {
    pub sections: Vec<DisplaySection>,
    pub completeness: u8,
    pub badge: ReadinessBadge,
    pub is_valid: bool,
}

pub fn severity_color(finding_type: FindingType) -> &'static str {
    match finding_type {
        FindingType::Error => "red",
        FindingType::Warning => "orange",
        FindingType::Info => "blue",
    }
}

pub fn severity_heading(finding_type: FindingType) -> &'static str {
    match finding_type {
        FindingType::Error => "Errors",
        FindingType::Warning => "Warnings",
        FindingType::Info => "Suggestions",
    }
}

pub fn readiness_badge(readiness: Readiness) -> ReadinessBadge {
    let (label, color) = match readiness {
        Readiness::Draft => ("Draft", "gray"),
        Readiness::Incomplete => ("Incomplete", "orange"),
        Readiness::Ready => ("Ready", "blue"),
        Readiness::Optimized => ("Optimized", "green"),
    };
    ReadinessBadge {
        readiness,
        label,
        color,
    }
}

/// Fix actions for a finding: fixable findings get a fix, findings tied to
/// a stage can jump to that stage's configuration.
pub fn actions_for(finding: &ValidationFinding) -> Vec<FixAction> {
    let mut actions = Vec::new();
    if finding.fixable {
        actions.push(FixAction::FixError {
            finding_id: finding.id.clone(),
            stage_id: finding.stage_id.clone(),
        });
    }
    if let Some(stage_id) = &finding.stage_id {
        actions.push(FixAction::ConfigureStage {
            stage_id: stage_id.clone(),
        });
    }
    actions
}

impl ValidationDisplay {
    pub fn from_result(result: &JourneyValidationResult) -> Self {
        let section = |finding_type: FindingType, findings: &[ValidationFinding]| DisplaySection {
            finding_type,
            heading: severity_heading(finding_type),
            color: severity_color(finding_type),
            items: findings
                .iter()
                .map(|f| DisplayItem {
                    finding: f.clone(),
                    actions: actions_for(f),
                })
                .collect(),
        };

        Self {
            sections: vec![
                section(FindingType::Error, &result.errors),
                section(FindingType::Warning, &result.warnings),
                section(FindingType::Info, &result.suggestions),
            ],
            completeness: result.completeness,
            badge: readiness_badge(result.readiness),
            is_valid: result.is_valid,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Readiness: {}  Completeness: {}%  Valid: {}",
            self.badge.label,
            self.completeness,
            if self.is_valid { "yes" } else { "no" }
        );

        for section in &self.sections {
            if section.items.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n{} ({})", section.heading, section.items.len());
            for item in &section.items {
                let finding = &item.finding;
                match &finding.stage_id {
                    Some(stage_id) => {
                        let _ = writeln!(
                            out,
                            "  - [{}] {} (stage {})",
                            finding.id, finding.title, stage_id
                        );
                    }
                    None => {
                        let _ = writeln!(out, "  - [{}] {}", finding.id, finding.title);
                    }
                }
                let _ = writeln!(out, "      {}", finding.message);
                if let Some(suggestion) = &finding.suggestion {
                    let _ = writeln!(out, "      hint: {}", suggestion);
                }
                if finding.fixable {
                    let _ = writeln!(out, "      fixable");
                }
            }
        }

        out
    }
}
