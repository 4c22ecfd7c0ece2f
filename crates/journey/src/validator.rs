//! Rule-based journey linting: findings, completeness score and readiness.

use std::collections::{HashMap, HashSet};

use campaign_core::ValidationConfig;
use tracing::debug;

use crate::rules::{
    self, COMPLETENESS_MAX_POINTS, DEFAULT_STAGE_DESCRIPTION, POINTS_CHANNELS, POINTS_CONFIGURED,
    POINTS_CONTENT_TYPES, POINTS_CUSTOM_NAME, POINTS_EXISTS,
};
use crate::types::{
    DeletionCheck, FindingType, JourneyCategory, JourneyValidationResult, Readiness, Stage,
    StageType, ValidationFinding,
};

/// Validates journey stage lists. Holds only thresholds; every call is a
/// pure function of its arguments.
#[derive(Debug, Clone, Default)]
pub struct JourneyValidator {
    config: ValidationConfig,
}

/// Accumulates findings by severity during one pass.
#[derive(Default)]
struct Findings {
    errors: Vec<ValidationFinding>,
    warnings: Vec<ValidationFinding>,
    suggestions: Vec<ValidationFinding>,
}

impl Findings {
    fn push(&mut self, finding: ValidationFinding) {
        match finding.finding_type {
            FindingType::Error => self.errors.push(finding),
            FindingType::Warning => self.warnings.push(finding),
            FindingType::Info => self.suggestions.push(finding),
        }
    }
}

impl JourneyValidator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Runs every rule group over `stages` and derives completeness and
    /// readiness from the findings.
    pub fn validate_journey(
        &self,
        stages: &[Stage],
        category: Option<JourneyCategory>,
    ) -> JourneyValidationResult {
        let mut findings = Findings::default();

        self.check_basic_requirements(stages, &mut findings);
        if !stages.is_empty() {
            self.check_stage_configuration(stages, &mut findings);
        }
        if stages.len() >= 2 {
            self.check_stage_flow(stages, &mut findings);
        }
        if let Some(category) = category {
            self.check_category_requirements(stages, category, &mut findings);
        }
        self.check_optimizations(stages, &mut findings);

        let completeness = completeness_score(stages);
        let readiness = classify_readiness(
            stages.len(),
            findings.errors.len(),
            findings.warnings.len(),
            completeness,
        );

        debug!(
            stages = stages.len(),
            category = category.map(|c| c.as_str()),
            errors = findings.errors.len(),
            warnings = findings.warnings.len(),
            suggestions = findings.suggestions.len(),
            completeness,
            readiness = readiness.as_str(),
            "Journey validated"
        );

        JourneyValidationResult {
            is_valid: findings.errors.is_empty(),
            errors: findings.errors,
            warnings: findings.warnings,
            suggestions: findings.suggestions,
            completeness,
            readiness,
        }
    }

    /// Minimal checks for a single stage, independent of its neighbours.
    pub fn validate_single_stage(&self, stage: &Stage) -> Vec<ValidationFinding> {
        let mut errors = Vec::new();

        if stage.name.trim().is_empty() {
            errors.push(ValidationFinding::stage(
                format!("name-required-{}", stage.id),
                FindingType::Error,
                &stage.id,
                "Stage name required",
                "Every stage needs a name.",
            ));
        }

        if stage.channels.is_empty() {
            errors.push(ValidationFinding::stage(
                format!("channels-required-{}", stage.id),
                FindingType::Error,
                &stage.id,
                "Channel required",
                "Select at least one channel for this stage.",
            ));
        }

        errors
    }

    /// Simulates removing `stage_id` and refuses when the remaining journey
    /// would contain errors. The journey category is not considered.
    pub fn can_stage_be_deleted(&self, stages: &[Stage], stage_id: &str) -> DeletionCheck {
        if !stages.iter().any(|s| s.id == stage_id) {
            return DeletionCheck {
                can_delete: true,
                reason: None,
            };
        }

        let remaining: Vec<Stage> = stages
            .iter()
            .filter(|s| s.id != stage_id)
            .cloned()
            .collect();
        let result = self.validate_journey(&remaining, None);

        if result.errors.is_empty() {
            DeletionCheck {
                can_delete: true,
                reason: None,
            }
        } else {
            let titles: Vec<&str> = result.errors.iter().map(|e| e.title.as_str()).collect();
            DeletionCheck {
                can_delete: false,
                reason: Some(format!(
                    "Deleting this stage would leave the journey with errors: {}",
                    titles.join(", ")
                )),
            }
        }
    }

    fn check_basic_requirements(&self, stages: &[Stage], findings: &mut Findings) {
        if stages.is_empty() {
            findings.push(
                ValidationFinding::journey(
                    "no-stages",
                    FindingType::Error,
                    "No stages",
                    "A journey needs at least one stage.",
                )
                .with_suggestion("Add an awareness stage to start the journey."),
            );
            return;
        }

        let duplicates = duplicate_names(stages);
        if !duplicates.is_empty() {
            findings.push(
                ValidationFinding::journey(
                    "duplicate-names",
                    FindingType::Error,
                    "Duplicate stage names",
                    format!(
                        "Stage names must be unique. Duplicated: {}",
                        duplicates.join(", ")
                    ),
                )
                .with_suggestion("Rename stages so each one describes its own purpose."),
            );
        }

        if stages.len() > self.config.max_stages {
            findings.push(
                ValidationFinding::journey(
                    "too-many-stages",
                    FindingType::Warning,
                    "Long journey",
                    format!(
                        "This journey has {} stages; more than {} is hard for customers to follow.",
                        stages.len(),
                        self.config.max_stages
                    ),
                )
                .with_suggestion("Merge stages that share a goal."),
            );
        }
    }

    fn check_stage_configuration(&self, stages: &[Stage], findings: &mut Findings) {
        for stage in stages {
            if !stage.is_configured {
                findings.push(
                    ValidationFinding::stage(
                        format!("unconfigured-{}", stage.id),
                        FindingType::Warning,
                        &stage.id,
                        "Stage not configured",
                        format!("\"{}\" has not been configured yet.", stage.name),
                    )
                    .with_suggestion("Open the stage settings and complete its setup."),
                );
            }

            if stage.channels.is_empty() {
                findings.push(
                    ValidationFinding::stage(
                        format!("no-channels-{}", stage.id),
                        FindingType::Error,
                        &stage.id,
                        "No channels",
                        format!("\"{}\" has no channels assigned.", stage.name),
                    )
                    .with_suggestion(recommended_channels_hint(stage.stage_type)),
                );
            }

            if stage.content_types.is_empty() {
                findings.push(
                    ValidationFinding::stage(
                        format!("no-content-{}", stage.id),
                        FindingType::Error,
                        &stage.id,
                        "No content types",
                        format!("\"{}\" has no content types assigned.", stage.name),
                    )
                    .with_suggestion(recommended_content_hint(stage.stage_type)),
                );
            }

            if has_generic_name(stage) {
                findings.push(
                    ValidationFinding::stage(
                        format!("generic-name-{}", stage.id),
                        FindingType::Warning,
                        &stage.id,
                        "Generic stage name",
                        format!("\"{}\" is the default name for this stage.", stage.name),
                    )
                    .with_suggestion("Use a name that says what happens in this stage."),
                );
            }

            let description = stage.description.trim();
            if description.chars().count() < self.config.min_description_length
                || description.contains(DEFAULT_STAGE_DESCRIPTION)
            {
                findings.push(
                    ValidationFinding::stage(
                        format!("description-{}", stage.id),
                        FindingType::Info,
                        &stage.id,
                        "Improve description",
                        format!("\"{}\" needs a more detailed description.", stage.name),
                    )
                    .with_suggestion("Describe the audience and the goal of this stage."),
                );
            }
        }
    }

    fn check_stage_flow(&self, stages: &[Stage], findings: &mut Findings) {
        for pair in stages.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            if rules::is_allowed_transition(from.stage_type, to.stage_type) {
                continue;
            }
            let allowed: Vec<&str> = rules::allowed_next(from.stage_type)
                .iter()
                .map(|t| t.label())
                .collect();
            findings.push(
                ValidationFinding::stage(
                    format!("flow-{}-{}", from.id, to.id),
                    FindingType::Warning,
                    &to.id,
                    "Unusual stage transition",
                    format!(
                        "Moving from {} to {} is an unusual transition.",
                        from.stage_type.label(),
                        to.stage_type.label()
                    ),
                )
                .with_suggestion(format!(
                    "{} is usually followed by {}.",
                    from.stage_type.label(),
                    allowed.join(" or ")
                )),
            );
        }

        let present: HashSet<StageType> = stages.iter().map(|s| s.stage_type).collect();

        if !present.contains(&StageType::Awareness) {
            findings.push(
                ValidationFinding::journey(
                    "missing-awareness",
                    FindingType::Info,
                    "No awareness stage",
                    "Journeys usually start by building awareness.",
                )
                .with_suggestion("Add an awareness stage at the start."),
            );
        }

        if !present.contains(&StageType::Conversion) {
            findings.push(
                ValidationFinding::journey(
                    "missing-conversion",
                    FindingType::Warning,
                    "No conversion stage",
                    "This journey never asks customers to convert.",
                )
                .with_suggestion("Add a conversion stage.")
                .fixable(),
            );
        } else if !present.contains(&StageType::Retention) {
            findings.push(
                ValidationFinding::journey(
                    "missing-retention",
                    FindingType::Info,
                    "No retention stage",
                    "Customers who convert are not followed up.",
                )
                .with_suggestion("Add a retention stage after conversion."),
            );
        }
    }

    fn check_category_requirements(
        &self,
        stages: &[Stage],
        category: JourneyCategory,
        findings: &mut Findings,
    ) {
        let present: HashSet<StageType> = stages.iter().map(|s| s.stage_type).collect();

        for required in rules::required_stages(category) {
            if present.contains(required) {
                continue;
            }
            findings.push(
                ValidationFinding::journey(
                    format!("missing-required-{}", required.as_str()),
                    FindingType::Error,
                    format!("Missing {} stage", required.label()),
                    format!(
                        "{} journeys require a {} stage.",
                        category.as_str(),
                        required.as_str()
                    ),
                )
                .with_suggestion(format!("Add a {} stage.", required.as_str()))
                .fixable(),
            );
        }

        let optimal = rules::optimal_sequence(category);
        if !optimal.is_empty() && stages.len() == optimal.len() {
            let matches = stages
                .iter()
                .zip(optimal)
                .filter(|(stage, expected)| stage.stage_type == **expected)
                .count();
            let ratio = matches as f64 / optimal.len() as f64;
            if ratio < self.config.sequence_match_threshold {
                let order: Vec<&str> = optimal.iter().map(|t| t.label()).collect();
                findings.push(
                    ValidationFinding::journey(
                        "sequence-order",
                        FindingType::Info,
                        "Consider reordering stages",
                        format!(
                            "{} journeys usually follow a different stage order.",
                            category.as_str()
                        ),
                    )
                    .with_suggestion(format!("Try the order: {}.", order.join(" → "))),
                );
            }
        }
    }

    fn check_optimizations(&self, stages: &[Stage], findings: &mut Findings) {
        let channels: HashSet<&str> = stages
            .iter()
            .flat_map(|s| s.channels.iter().map(String::as_str))
            .collect();
        if stages.len() > 1 && channels.len() < self.config.min_distinct_channels {
            findings.push(
                ValidationFinding::journey(
                    "diversify-channels",
                    FindingType::Info,
                    "Diversify channels",
                    format!(
                        "The journey uses {} distinct channel(s).",
                        channels.len()
                    ),
                )
                .with_suggestion(format!(
                    "Reach customers on at least {} channels.",
                    self.config.min_distinct_channels
                )),
            );
        }

        let content_types: HashSet<&str> = stages
            .iter()
            .flat_map(|s| s.content_types.iter().map(String::as_str))
            .collect();
        if stages.len() > 2 && content_types.len() < self.config.min_distinct_content_types {
            findings.push(
                ValidationFinding::journey(
                    "diversify-content",
                    FindingType::Info,
                    "Diversify content",
                    format!(
                        "The journey uses {} distinct content type(s).",
                        content_types.len()
                    ),
                )
                .with_suggestion(format!(
                    "Mix at least {} content types across stages.",
                    self.config.min_distinct_content_types
                )),
            );
        }

        let configured = stages.iter().filter(|s| s.is_configured).count();
        if configured > self.config.ab_test_min_configured {
            findings.push(
                ValidationFinding::journey(
                    "ab-testing",
                    FindingType::Info,
                    "Set up A/B tests",
                    "Several stages are configured and can be split-tested.",
                )
                .with_suggestion("Test alternative content in your highest-traffic stage."),
            );
        }
    }
}

/// Names that occur more than once (case-insensitive), each reported once
/// in order of first appearance.
fn duplicate_names(stages: &[Stage]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut first_spelling: Vec<(String, String)> = Vec::new();

    for stage in stages {
        let name = stage.name.trim();
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        let count = seen.entry(key.clone()).or_insert(0);
        if *count == 0 {
            first_spelling.push((key, name.to_string()));
        }
        *count += 1;
    }

    first_spelling
        .into_iter()
        .filter(|(key, _)| seen.get(key).copied().unwrap_or(0) > 1)
        .map(|(_, name)| name)
        .collect()
}

/// True when the stage still carries the default "<type> stage" name.
pub fn has_generic_name(stage: &Stage) -> bool {
    let generic = format!("{} stage", stage.stage_type.as_str());
    stage.name.trim().to_lowercase() == generic
}

/// Weighted configuration score over all stages, 0..=100.
pub fn completeness_score(stages: &[Stage]) -> u8 {
    if stages.is_empty() {
        return 0;
    }

    let earned: u32 = stages.iter().map(stage_points).sum();
    let possible = stages.len() as u32 * COMPLETENESS_MAX_POINTS;
    (f64::from(earned) * 100.0 / f64::from(possible)).round() as u8
}

fn stage_points(stage: &Stage) -> u32 {
    let mut points = POINTS_EXISTS;
    if !stage.channels.is_empty() {
        points += POINTS_CHANNELS;
    }
    if !stage.content_types.is_empty() {
        points += POINTS_CONTENT_TYPES;
    }
    if stage.is_configured {
        points += POINTS_CONFIGURED;
    }
    if !has_generic_name(stage) {
        points += POINTS_CUSTOM_NAME;
    }
    points
}

/// Maps counts and completeness to a readiness level; first match wins.
pub fn classify_readiness(
    stage_count: usize,
    error_count: usize,
    warning_count: usize,
    completeness: u8,
) -> Readiness {
    if stage_count == 0 || error_count > 0 {
        Readiness::Draft
    } else if completeness < 50 || warning_count > 3 {
        Readiness::Incomplete
    } else if completeness < 80 || warning_count > 0 {
        Readiness::Ready
    } else {
        Readiness::Optimized
    }
}

fn recommended_channels_hint(stage_type: StageType) -> String {
    match rules::recommendation_for(stage_type) {
        Some(rec) => format!("Try channels such as {}.", rec.channels.join(", ")),
        None => "Assign at least one channel.".to_string(),
    }
}

fn recommended_content_hint(stage_type: StageType) -> String {
    match rules::recommendation_for(stage_type) {
        Some(rec) => format!("Try content such as {}.", rec.content_types.join(", ")),
        None => "Assign at least one content type.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FindingLevel;

    fn stage(id: &str, name: &str, stage_type: StageType) -> Stage {
        Stage {
            id: id.to_string(),
            name: name.to_string(),
            description: "A carefully written description of the stage".to_string(),
            stage_type,
            channels: vec!["email".to_string()],
            content_types: vec!["newsletter".to_string()],
            position: 0,
            is_configured: true,
        }
    }

    fn ids(findings: &[ValidationFinding]) -> Vec<&str> {
        findings.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_empty_journey() {
        let result = JourneyValidator::default().validate_journey(&[], None);
        assert!(!result.is_valid);
        assert_eq!(ids(&result.errors), vec!["no-stages"]);
        assert!(result.warnings.is_empty());
        assert!(result.suggestions.is_empty());
        assert_eq!(result.completeness, 0);
        assert_eq!(result.readiness, Readiness::Draft);
    }

    #[test]
    fn test_duplicate_names_listed_once() {
        let stages = vec![
            stage("a", "Awareness", StageType::Awareness),
            stage("b", "awareness", StageType::Consideration),
            stage("c", "AWARENESS", StageType::Conversion),
        ];
        let result = JourneyValidator::default().validate_journey(&stages, None);
        let dup = result
            .errors
            .iter()
            .find(|e| e.id == "duplicate-names")
            .unwrap();
        assert_eq!(dup.message.matches("wareness").count(), 1);
    }

    #[test]
    fn test_too_many_stages_is_only_a_warning() {
        let stages: Vec<Stage> = (0..11)
            .map(|i| stage(&format!("s{i}"), &format!("Step {i}"), StageType::Retention))
            .collect();
        let result = JourneyValidator::default().validate_journey(&stages, None);
        assert!(result.warnings.iter().any(|w| w.id == "too-many-stages"));
        assert!(!result.errors.iter().any(|e| e.id == "too-many-stages"));
    }

    #[test]
    fn test_stage_configuration_findings() {
        let mut s = stage("s1", "Awareness Stage", StageType::Awareness);
        s.is_configured = false;
        s.channels.clear();
        s.content_types.clear();
        s.description = DEFAULT_STAGE_DESCRIPTION.to_string();

        let result = JourneyValidator::default().validate_journey(&[s], None);
        assert_eq!(ids(&result.errors), vec!["no-channels-s1", "no-content-s1"]);
        assert_eq!(
            ids(&result.warnings),
            vec!["unconfigured-s1", "generic-name-s1"]
        );
        assert!(result.suggestions.iter().any(|f| f.id == "description-s1"));
        for finding in result.findings() {
            if finding.level == FindingLevel::Stage {
                assert_eq!(finding.stage_id.as_deref(), Some("s1"));
            }
        }
    }

    #[test]
    fn test_short_description_suggestion() {
        let mut s = stage("s1", "Launch teaser", StageType::Awareness);
        s.description = "Too short".to_string();
        let result = JourneyValidator::default().validate_journey(&[s], None);
        assert!(result.has_finding("description-s1"));
    }

    #[test]
    fn test_unusual_transition_warns_on_later_stage() {
        let stages = vec![
            stage("a", "Buy now", StageType::Conversion),
            stage("b", "Discover", StageType::Awareness),
        ];
        let result = JourneyValidator::default().validate_journey(&stages, None);
        let flow = result.warnings.iter().find(|w| w.id == "flow-a-b").unwrap();
        assert_eq!(flow.stage_id.as_deref(), Some("b"));
        assert!(flow.message.contains("Conversion"));
        assert!(flow.message.contains("Awareness"));
    }

    #[test]
    fn test_sequence_level_findings() {
        let stages = vec![
            stage("a", "Compare", StageType::Consideration),
            stage("b", "Keep", StageType::Retention),
        ];
        let result = JourneyValidator::default().validate_journey(&stages, None);
        assert!(result.has_finding("missing-awareness"));
        let conversion = result
            .warnings
            .iter()
            .find(|w| w.id == "missing-conversion")
            .unwrap();
        assert!(conversion.fixable);
        assert!(!result.has_finding("missing-retention"));

        let stages = vec![
            stage("a", "Discover", StageType::Awareness),
            stage("b", "Buy", StageType::Conversion),
        ];
        let result = JourneyValidator::default().validate_journey(&stages, None);
        assert!(result.has_finding("missing-retention"));
        assert!(!result.has_finding("missing-conversion"));
    }

    #[test]
    fn test_single_stage_skips_flow_rules() {
        let result = JourneyValidator::default()
            .validate_journey(&[stage("a", "Compare", StageType::Consideration)], None);
        assert!(!result.has_finding("missing-conversion"));
        assert!(!result.has_finding("missing-awareness"));
    }

    #[test]
    fn test_category_required_stages() {
        let stages = vec![
            stage("a", "Discover", StageType::Awareness),
            stage("b", "Compare", StageType::Consideration),
        ];
        let result = JourneyValidator::default()
            .validate_journey(&stages, Some(JourneyCategory::ProductLaunch));
        let missing = result
            .errors
            .iter()
            .find(|e| e.id == "missing-required-conversion")
            .unwrap();
        assert!(missing.fixable);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_sequence_order_suggestion() {
        // Optimal for brand-awareness: awareness, consideration, retention.
        let reversed = vec![
            stage("a", "Keep", StageType::Retention),
            stage("b", "Compare", StageType::Consideration),
            stage("c", "Discover", StageType::Awareness),
        ];
        let result = JourneyValidator::default()
            .validate_journey(&reversed, Some(JourneyCategory::BrandAwareness));
        assert!(result.has_finding("sequence-order"));

        let ordered = vec![
            stage("a", "Discover", StageType::Awareness),
            stage("b", "Compare", StageType::Consideration),
            stage("c", "Keep", StageType::Retention),
        ];
        let result = JourneyValidator::default()
            .validate_journey(&ordered, Some(JourneyCategory::BrandAwareness));
        assert!(!result.has_finding("sequence-order"));
    }

    #[test]
    fn test_sequence_order_ignored_when_lengths_differ() {
        let stages = vec![
            stage("a", "Keep", StageType::Retention),
            stage("b", "Buy", StageType::Conversion),
        ];
        let result = JourneyValidator::default()
            .validate_journey(&stages, Some(JourneyCategory::ProductLaunch));
        assert!(!result.has_finding("sequence-order"));
    }

    #[test]
    fn test_optimization_suggestions() {
        let stages = vec![
            stage("a", "Discover", StageType::Awareness),
            stage("b", "Compare", StageType::Consideration),
            stage("c", "Buy", StageType::Conversion),
        ];
        let result = JourneyValidator::default().validate_journey(&stages, None);
        assert!(result.has_finding("diversify-channels"));
        assert!(result.has_finding("diversify-content"));
        assert!(result.has_finding("ab-testing"));
    }

    #[test]
    fn test_completeness_weights() {
        let mut bare = stage("a", "Awareness Stage", StageType::Awareness);
        bare.channels.clear();
        bare.content_types.clear();
        bare.is_configured = false;
        assert_eq!(completeness_score(&[bare.clone()]), 30);

        let full = stage("b", "Discover", StageType::Awareness);
        assert_eq!(completeness_score(&[full.clone()]), 100);
        assert_eq!(completeness_score(&[bare, full]), 65);
        assert_eq!(completeness_score(&[]), 0);
    }

    #[test]
    fn test_readiness_thresholds() {
        assert_eq!(classify_readiness(0, 0, 0, 100), Readiness::Draft);
        assert_eq!(classify_readiness(3, 1, 0, 100), Readiness::Draft);
        assert_eq!(classify_readiness(3, 0, 0, 49), Readiness::Incomplete);
        assert_eq!(classify_readiness(3, 0, 4, 90), Readiness::Incomplete);
        assert_eq!(classify_readiness(3, 0, 0, 60), Readiness::Ready);
        assert_eq!(classify_readiness(3, 0, 1, 95), Readiness::Ready);
        assert_eq!(classify_readiness(3, 0, 0, 85), Readiness::Optimized);
    }

    #[test]
    fn test_validate_single_stage() {
        let validator = JourneyValidator::default();
        let mut s = stage("s1", "   ", StageType::Awareness);
        s.channels.clear();
        let errors = validator.validate_single_stage(&s);
        assert_eq!(
            ids(&errors),
            vec!["name-required-s1", "channels-required-s1"]
        );

        let ok = stage("s2", "Discover", StageType::Awareness);
        assert!(validator.validate_single_stage(&ok).is_empty());
    }

    #[test]
    fn test_can_stage_be_deleted() {
        let validator = JourneyValidator::default();
        let only = vec![stage("a", "Discover", StageType::Awareness)];
        let check = validator.can_stage_be_deleted(&only, "a");
        assert!(!check.can_delete);
        assert!(check.reason.unwrap().contains("No stages"));

        let unknown = validator.can_stage_be_deleted(&only, "missing");
        assert!(unknown.can_delete);
        assert!(unknown.reason.is_none());
    }

    #[test]
    fn test_config_thresholds_are_honoured() {
        let config = ValidationConfig {
            max_stages: 1,
            ..ValidationConfig::default()
        };
        let stages = vec![
            stage("a", "Discover", StageType::Awareness),
            stage("b", "Buy", StageType::Conversion),
        ];
        let result = JourneyValidator::new(&config).validate_journey(&stages, None);
        assert!(result.has_finding("too-many-stages"));
    }

    #[test]
    fn test_exactly_max_stages_does_not_warn() {
        let stages: Vec<Stage> = (0..10)
            .map(|i| stage(&format!("s{i}"), &format!("Step {i}"), StageType::Retention))
            .collect();
        let result = JourneyValidator::default().validate_journey(&stages, None);
        assert!(!result.has_finding("too-many-stages"));
    }

    #[test]
    fn test_two_stages_skip_content_diversity() {
        let stages = vec![
            stage("a", "Discover", StageType::Awareness),
            stage("b", "Buy", StageType::Conversion),
        ];
        let result = JourneyValidator::default().validate_journey(&stages, None);
        assert!(!result.has_finding("diversify-content"));
        assert!(result.has_finding("diversify-channels"));
    }

    #[test]
    fn test_two_configured_stages_skip_ab_testing() {
        let mut stages = vec![
            stage("a", "Discover", StageType::Awareness),
            stage("b", "Compare", StageType::Consideration),
            stage("c", "Buy", StageType::Conversion),
        ];
        stages[2].is_configured = false;
        let result = JourneyValidator::default().validate_journey(&stages, None);
        assert!(!result.has_finding("ab-testing"));

        stages[2].is_configured = true;
        let result = JourneyValidator::default().validate_journey(&stages, None);
        assert!(result.has_finding("ab-testing"));
    }

    #[test]
    fn test_description_length_boundary() {
        let exact = "Nurture trial signup";
        assert_eq!(exact.chars().count(), 20);

        let mut s = stage("s1", "Launch teaser", StageType::Awareness);
        s.description = format!("  {exact}  ");
        let result = JourneyValidator::default().validate_journey(&[s.clone()], None);
        assert!(!result.has_finding("description-s1"));

        s.description = exact[..19].to_string();
        let result = JourneyValidator::default().validate_journey(&[s], None);
        assert!(result.has_finding("description-s1"));
    }
}
