//! Customer journey validation: rule-based linting of journey stages with
//! completeness scoring, readiness classification, and an editing state
//! container that keeps validation current.

pub mod builder;
pub mod display;
pub mod rules;
pub mod store;
pub mod types;
pub mod validator;

pub use builder::{BuilderAction, JourneyBuilder, StageUpdate};
pub use display::ValidationDisplay;
pub use store::DraftStore;
pub use types::{
    DeletionCheck, FindingLevel, FindingType, JourneyCategory, JourneyValidationResult, Readiness,
    Stage, StageType, ValidationFinding,
};
pub use validator::JourneyValidator;

/// Validates `stages` with default thresholds.
pub fn validate_journey(
    stages: &[Stage],
    category: Option<JourneyCategory>,
) -> JourneyValidationResult {
    JourneyValidator::default().validate_journey(stages, category)
}

/// Checks one stage in isolation with default thresholds.
pub fn validate_single_stage(stage: &Stage) -> Vec<ValidationFinding> {
    JourneyValidator::default().validate_single_stage(stage)
}

/// Whether `stage_id` can be removed without leaving errors behind.
pub fn can_stage_be_deleted(stages: &[Stage], stage_id: &str) -> DeletionCheck {
    JourneyValidator::default().can_stage_be_deleted(stages, stage_id)
}
