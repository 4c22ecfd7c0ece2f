use std::fmt;
use std::str::FromStr;

use campaign_core::CampaignError;
use serde::{Deserialize, Serialize};

/// Phase of a customer journey a stage belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageType {
    Awareness,
    Consideration,
    Conversion,
    Retention,
}

impl StageType {
    pub const ALL: [StageType; 4] = [
        StageType::Awareness,
        StageType::Consideration,
        StageType::Conversion,
        StageType::Retention,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageType::Awareness => "awareness",
            StageType::Consideration => "consideration",
            StageType::Conversion => "conversion",
            StageType::Retention => "retention",
        }
    }

    /// Title-cased name used in generated stage names and messages.
    pub fn label(&self) -> &'static str {
        match self {
            StageType::Awareness => "Awareness",
            StageType::Consideration => "Consideration",
            StageType::Conversion => "Conversion",
            StageType::Retention => "Retention",
        }
    }

    /// The name the builder gives a freshly added stage, e.g. "Awareness Stage".
    pub fn default_stage_name(&self) -> String {
        format!("{} Stage", self.label())
    }
}

impl fmt::Display for StageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One phase of a customer journey with its assigned channels and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub stage_type: StageType,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub content_types: Vec<String>,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub is_configured: bool,
}

/// Journey templates a builder can start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JourneyCategory {
    ProductLaunch,
    LeadGeneration,
    ReEngagement,
    BrandAwareness,
}

impl JourneyCategory {
    pub const ALL: [JourneyCategory; 4] = [
        JourneyCategory::ProductLaunch,
        JourneyCategory::LeadGeneration,
        JourneyCategory::ReEngagement,
        JourneyCategory::BrandAwareness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JourneyCategory::ProductLaunch => "product-launch",
            JourneyCategory::LeadGeneration => "lead-generation",
            JourneyCategory::ReEngagement => "re-engagement",
            JourneyCategory::BrandAwareness => "brand-awareness",
        }
    }
}

impl fmt::Display for JourneyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JourneyCategory {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JourneyCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CampaignError::Validation(format!("Unknown journey category: {s}")))
    }
}

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingType {
    Error,
    Warning,
    Info,
}

/// Whether a finding concerns the journey as a whole or one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingLevel {
    Journey,
    Stage,
}

/// A single validator output item.
///
/// `id` is stable for a given rule and target so callers can track
/// per-finding UI state across re-validations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFinding {
    pub id: String,
    #[serde(rename = "type")]
    pub finding_type: FindingType,
    pub level: FindingLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub fixable: bool,
}

impl ValidationFinding {
    pub fn journey(
        id: impl Into<String>,
        finding_type: FindingType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            finding_type,
            level: FindingLevel::Journey,
            stage_id: None,
            title: title.into(),
            message: message.into(),
            suggestion: None,
            fixable: false,
        }
    }

    pub fn stage(
        id: impl Into<String>,
        finding_type: FindingType,
        stage_id: &str,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            finding_type,
            level: FindingLevel::Stage,
            stage_id: Some(stage_id.to_string()),
            title: title.into(),
            message: message.into(),
            suggestion: None,
            fixable: false,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn fixable(mut self) -> Self {
        self.fixable = true;
        self
    }
}

/// Coarse maturity classification of a journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    Draft,
    Incomplete,
    Ready,
    Optimized,
}

impl Readiness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Readiness::Draft => "draft",
            Readiness::Incomplete => "incomplete",
            Readiness::Ready => "ready",
            Readiness::Optimized => "optimized",
        }
    }
}

/// Full outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationFinding>,
    pub warnings: Vec<ValidationFinding>,
    pub suggestions: Vec<ValidationFinding>,
    pub completeness: u8,
    pub readiness: Readiness,
}

impl JourneyValidationResult {
    /// All findings in error, warning, suggestion order.
    pub fn findings(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.suggestions.iter())
    }

    pub fn has_finding(&self, id: &str) -> bool {
        self.findings().any(|f| f.id == id)
    }
}

/// Answer to "may this stage be removed?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionCheck {
    pub can_delete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_wire_format() {
        let json = r#"{
            "id": "s1",
            "name": "Launch Teaser",
            "description": "Tease the launch on social",
            "type": "awareness",
            "channels": ["social"],
            "contentTypes": ["video"],
            "position": 0,
            "isConfigured": true
        }"#;
        let stage: Stage = serde_json::from_str(json).unwrap();
        assert_eq!(stage.stage_type, StageType::Awareness);
        assert_eq!(stage.content_types, vec!["video".to_string()]);
        assert!(stage.is_configured);

        let out = serde_json::to_value(&stage).unwrap();
        assert_eq!(out["type"], "awareness");
        assert_eq!(out["isConfigured"], true);
    }

    #[test]
    fn test_stage_defaults_for_missing_fields() {
        let stage: Stage =
            serde_json::from_str(r#"{"id": "s1", "name": "Nurture", "type": "consideration"}"#)
                .unwrap();
        assert!(stage.channels.is_empty());
        assert!(stage.content_types.is_empty());
        assert!(!stage.is_configured);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(
            "re-engagement".parse::<JourneyCategory>().unwrap(),
            JourneyCategory::ReEngagement
        );
        assert!("webinar".parse::<JourneyCategory>().is_err());
        let json = serde_json::to_string(&JourneyCategory::ProductLaunch).unwrap();
        assert_eq!(json, "\"product-launch\"");
    }

    #[test]
    fn test_finding_omits_empty_optionals() {
        let finding = ValidationFinding::journey("no-stages", FindingType::Error, "t", "m");
        let out = serde_json::to_value(&finding).unwrap();
        assert!(out.get("stageId").is_none());
        assert!(out.get("suggestion").is_none());
        assert_eq!(out["type"], "error");
        assert_eq!(out["level"], "journey");
    }
}
