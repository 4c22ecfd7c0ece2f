use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use campaign_core::{CampaignError, CampaignResult};

use crate::builder::{BuilderAction, JourneyBuilder};
use crate::types::{JourneyCategory, JourneyValidationResult, Stage};
use crate::validator::JourneyValidator;

/// A named journey under construction.
#[derive(Debug, Clone)]
pub struct JourneyDraft {
    pub id: Uuid,
    pub name: String,
    pub builder: JourneyBuilder,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-only view of a draft handed out to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub id: Uuid,
    pub name: String,
    pub category: Option<JourneyCategory>,
    pub stages: Vec<Stage>,
    pub validation: JourneyValidationResult,
    pub updated_at: DateTime<Utc>,
}

impl From<&JourneyDraft> for DraftSnapshot {
    fn from(draft: &JourneyDraft) -> Self {
        Self {
            id: draft.id,
            name: draft.name.clone(),
            category: draft.builder.category(),
            stages: draft.builder.stages().to_vec(),
            validation: draft.builder.validation().clone(),
            updated_at: draft.updated_at,
        }
    }
}

/// In-memory registry of journey drafts, safe to share across threads.
#[derive(Clone)]
pub struct DraftStore {
    drafts: Arc<DashMap<Uuid, JourneyDraft>>,
    validator: JourneyValidator,
}

impl std::fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore")
            .field("drafts", &self.drafts.len())
            .finish()
    }
}

impl DraftStore {
    pub fn new(validator: JourneyValidator) -> Self {
        Self {
            drafts: Arc::new(DashMap::new()),
            validator,
        }
    }

    /// Creates a draft, empty or from a category template, and returns its id.
    pub fn create_draft(&self, name: &str, template: Option<JourneyCategory>) -> Uuid {
        let builder = match template {
            Some(category) => JourneyBuilder::from_template(self.validator.clone(), category),
            None => JourneyBuilder::new(self.validator.clone()),
        };
        let id = Uuid::new_v4();
        let now = Utc::now();
        info!(draft_id = %id, name = %name, ?template, "Creating journey draft");
        self.drafts.insert(
            id,
            JourneyDraft {
                id,
                name: name.to_string(),
                builder,
                created_at: now,
                updated_at: now,
            },
        );
        metrics::counter!("journey.drafts.created").increment(1);
        id
    }

    pub fn get_draft(&self, id: &Uuid) -> Option<DraftSnapshot> {
        self.drafts.get(id).map(|r| DraftSnapshot::from(r.value()))
    }

    pub fn list_drafts(&self) -> Vec<DraftSnapshot> {
        let mut drafts: Vec<DraftSnapshot> = self
            .drafts
            .iter()
            .map(|r| DraftSnapshot::from(r.value()))
            .collect();
        drafts.sort_by(|a, b| a.name.cmp(&b.name));
        drafts
    }

    /// Applies an edit to a draft and returns the refreshed validation.
    pub fn apply(&self, id: &Uuid, action: BuilderAction) -> CampaignResult<JourneyValidationResult> {
        let mut entry = self
            .drafts
            .get_mut(id)
            .ok_or_else(|| CampaignError::NotFound(format!("Draft {} not found", id)))?;

        let result = match entry.builder.apply(action) {
            Ok(result) => result.clone(),
            Err(e) => {
                metrics::counter!("journey.edits.rejected").increment(1);
                return Err(e);
            }
        };
        entry.updated_at = Utc::now();
        metrics::counter!("journey.edits.applied").increment(1);
        info!(
            draft_id = %id,
            readiness = result.readiness.as_str(),
            completeness = result.completeness,
            "Journey draft updated"
        );
        Ok(result)
    }

    /// Current validation of a draft, optionally under a different category.
    pub fn validate(
        &self,
        id: &Uuid,
        category: Option<JourneyCategory>,
    ) -> CampaignResult<JourneyValidationResult> {
        let entry = self
            .drafts
            .get(id)
            .ok_or_else(|| CampaignError::NotFound(format!("Draft {} not found", id)))?;
        metrics::counter!("journey.validations").increment(1);
        Ok(match category {
            Some(category) => self
                .validator
                .validate_journey(entry.builder.stages(), Some(category)),
            None => entry.builder.validation().clone(),
        })
    }

    pub fn delete_draft(&self, id: &Uuid) -> CampaignResult<()> {
        self.drafts
            .remove(id)
            .ok_or_else(|| CampaignError::NotFound(format!("Draft {} not found", id)))?;
        info!(draft_id = %id, "Deleted journey draft");
        Ok(())
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new(JourneyValidator::default())
    }
}
