use std::collections::BTreeSet;

use campaign_core::{CampaignError, CampaignResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::rules::{self, DEFAULT_STAGE_DESCRIPTION};
use crate::types::{JourneyCategory, JourneyValidationResult, Stage, StageType};
use crate::validator::JourneyValidator;

/// Partial edit of a stage's settings; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub stage_type: Option<StageType>,
    pub channels: Option<Vec<String>>,
    pub content_types: Option<Vec<String>>,
    pub is_configured: Option<bool>,
}

/// Edits the journey builder accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum BuilderAction {
    AddStage { stage_type: StageType },
    RemoveStage { stage_id: String },
    MoveStage { stage_id: String, to_index: usize },
    ConfigureStage { stage_id: String, update: StageUpdate },
    SetCategory { category: Option<JourneyCategory> },
    FixFinding { finding_id: String },
}

/// Owns the editable stage list of one journey and keeps a validation
/// result that always matches it.
#[derive(Debug, Clone)]
pub struct JourneyBuilder {
    stages: Vec<Stage>,
    category: Option<JourneyCategory>,
    validator: JourneyValidator,
    result: JourneyValidationResult,
    expanded: BTreeSet<String>,
    implemented: BTreeSet<String>,
}

impl JourneyBuilder {
    /// Creates an empty journey.
    pub fn new(validator: JourneyValidator) -> Self {
        let result = validator.validate_journey(&[], None);
        Self {
            stages: Vec::new(),
            category: None,
            validator,
            result,
            expanded: BTreeSet::new(),
            implemented: BTreeSet::new(),
        }
    }

    /// Creates a journey pre-populated with the category's optimal stage
    /// sequence, seeded with recommended channels and content types.
    pub fn from_template(validator: JourneyValidator, category: JourneyCategory) -> Self {
        let mut builder = Self::new(validator);
        builder.category = Some(category);
        builder.stages = rules::optimal_sequence(category)
            .iter()
            .map(|stage_type| {
                let mut stage = new_stage(*stage_type);
                if let Some(rec) = rules::recommendation_for(*stage_type) {
                    stage.channels = rec.channels.iter().map(|c| c.to_string()).collect();
                    stage.content_types =
                        rec.content_types.iter().map(|c| c.to_string()).collect();
                }
                stage
            })
            .collect();
        builder.refresh();
        info!(
            category = category.as_str(),
            stages = builder.stages.len(),
            "Journey created from template"
        );
        builder
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn category(&self) -> Option<JourneyCategory> {
        self.category
    }

    pub fn validation(&self) -> &JourneyValidationResult {
        &self.result
    }

    pub fn validator(&self) -> &JourneyValidator {
        &self.validator
    }

    /// Applies one edit. On error the journey is left unchanged.
    pub fn apply(&mut self, action: BuilderAction) -> CampaignResult<&JourneyValidationResult> {
        debug!(?action, "Applying builder action");

        match action {
            BuilderAction::AddStage { stage_type } => {
                let stage = new_stage(stage_type);
                info!(stage_id = %stage.id, stage_type = stage_type.as_str(), "Adding stage");
                self.stages.push(stage);
            }
            BuilderAction::RemoveStage { stage_id } => {
                self.index_of(&stage_id)?;
                let check = self.validator.can_stage_be_deleted(&self.stages, &stage_id);
                if !check.can_delete {
                    return Err(CampaignError::Validation(check.reason.unwrap_or_else(
                        || format!("Stage {} cannot be deleted", stage_id),
                    )));
                }
                info!(stage_id = %stage_id, "Removing stage");
                self.stages.retain(|s| s.id != stage_id);
            }
            BuilderAction::MoveStage { stage_id, to_index } => {
                let from = self.index_of(&stage_id)?;
                if to_index >= self.stages.len() {
                    return Err(CampaignError::Validation(format!(
                        "Cannot move stage to index {}; journey has {} stages",
                        to_index,
                        self.stages.len()
                    )));
                }
                let stage = self.stages.remove(from);
                self.stages.insert(to_index, stage);
            }
            BuilderAction::ConfigureStage { stage_id, update } => {
                let idx = self.index_of(&stage_id)?;
                let stage = &mut self.stages[idx];
                if let Some(name) = update.name {
                    stage.name = name;
                }
                if let Some(description) = update.description {
                    stage.description = description;
                }
                if let Some(stage_type) = update.stage_type {
                    stage.stage_type = stage_type;
                }
                if let Some(channels) = update.channels {
                    stage.channels = channels;
                }
                if let Some(content_types) = update.content_types {
                    stage.content_types = content_types;
                }
                if let Some(is_configured) = update.is_configured {
                    stage.is_configured = is_configured;
                }
            }
            BuilderAction::SetCategory { category } => {
                self.category = category;
            }
            BuilderAction::FixFinding { finding_id } => {
                let stage_type = self.fix_target(&finding_id)?;
                let idx = insertion_index(&self.stages, stage_type);
                let stage = new_stage(stage_type);
                info!(
                    finding_id = %finding_id,
                    stage_id = %stage.id,
                    index = idx,
                    "Fixing finding by inserting stage"
                );
                self.stages.insert(idx, stage);
            }
        }

        self.refresh();
        Ok(&self.result)
    }

    /// Toggles whether a finding is shown expanded. Returns the new state.
    pub fn toggle_expanded(&mut self, finding_id: &str) -> bool {
        if self.expanded.remove(finding_id) {
            false
        } else if self.result.has_finding(finding_id) {
            self.expanded.insert(finding_id.to_string());
            true
        } else {
            false
        }
    }

    pub fn is_expanded(&self, finding_id: &str) -> bool {
        self.expanded.contains(finding_id)
    }

    /// Marks a current suggestion as acted upon.
    pub fn mark_implemented(&mut self, finding_id: &str) -> CampaignResult<()> {
        if !self.result.suggestions.iter().any(|f| f.id == finding_id) {
            return Err(CampaignError::NotFound(format!(
                "Suggestion {} not present",
                finding_id
            )));
        }
        self.implemented.insert(finding_id.to_string());
        Ok(())
    }

    pub fn is_implemented(&self, finding_id: &str) -> bool {
        self.implemented.contains(finding_id)
    }

    fn index_of(&self, stage_id: &str) -> CampaignResult<usize> {
        self.stages
            .iter()
            .position(|s| s.id == stage_id)
            .ok_or_else(|| CampaignError::NotFound(format!("Stage {} not found", stage_id)))
    }

    /// Stage type that resolves a fixable finding.
    fn fix_target(&self, finding_id: &str) -> CampaignResult<StageType> {
        let finding = self
            .result
            .findings()
            .find(|f| f.id == finding_id)
            .ok_or_else(|| CampaignError::NotFound(format!("Finding {} not present", finding_id)))?;
        if !finding.fixable {
            return Err(CampaignError::Validation(format!(
                "Finding {} has no automatic fix",
                finding_id
            )));
        }

        if finding_id == "missing-conversion" {
            return Ok(StageType::Conversion);
        }
        StageType::ALL
            .into_iter()
            .find(|t| finding_id == format!("missing-required-{}", t.as_str()))
            .ok_or_else(|| {
                CampaignError::Validation(format!("Finding {} has no automatic fix", finding_id))
            })
    }

    /// Renumbers positions, re-validates, and drops UI state for findings
    /// that no longer exist.
    fn refresh(&mut self) {
        for (idx, stage) in self.stages.iter_mut().enumerate() {
            stage.position = idx as u32;
        }
        self.result = self.validator.validate_journey(&self.stages, self.category);

        let result = &self.result;
        self.expanded.retain(|id| result.has_finding(id));
        self.implemented
            .retain(|id| result.suggestions.iter().any(|f| &f.id == id));
    }
}

fn new_stage(stage_type: StageType) -> Stage {
    Stage {
        id: Uuid::new_v4().to_string(),
        name: stage_type.default_stage_name(),
        description: DEFAULT_STAGE_DESCRIPTION.to_string(),
        stage_type,
        channels: Vec::new(),
        content_types: Vec::new(),
        position: 0,
        is_configured: false,
    }
}

fn funnel_rank(stage_type: StageType) -> u8 {
    match stage_type {
        StageType::Awareness => 0,
        StageType::Consideration => 1,
        StageType::Conversion => 2,
        StageType::Retention => 3,
    }
}

/// Index before the first stage that sits later in the funnel.
fn insertion_index(stages: &[Stage], stage_type: StageType) -> usize {
    stages
        .iter()
        .position(|s| funnel_rank(s.stage_type) > funnel_rank(stage_type))
        .unwrap_or(stages.len())
}
