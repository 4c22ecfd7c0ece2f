//! Fixed lookup tables consumed by the validator and the builder.

use crate::types::{JourneyCategory, StageType};

/// Placeholder the builder writes into the description of a new stage.
pub const DEFAULT_STAGE_DESCRIPTION: &str = "Describe the goal of this stage";

// Completeness weights, out of COMPLETENESS_MAX_POINTS per stage.
pub const POINTS_EXISTS: u32 = 3;
pub const POINTS_CHANNELS: u32 = 2;
pub const POINTS_CONTENT_TYPES: u32 = 2;
pub const POINTS_CONFIGURED: u32 = 2;
pub const POINTS_CUSTOM_NAME: u32 = 1;
pub const COMPLETENESS_MAX_POINTS: u32 =
    POINTS_EXISTS + POINTS_CHANNELS + POINTS_CONTENT_TYPES + POINTS_CONFIGURED + POINTS_CUSTOM_NAME;

/// Stage types allowed to directly follow each stage type.
pub const TRANSITION_RULES: &[(StageType, &[StageType])] = &[
    (
        StageType::Awareness,
        &[StageType::Consideration, StageType::Conversion],
    ),
    (
        StageType::Consideration,
        &[StageType::Conversion, StageType::Retention],
    ),
    (StageType::Conversion, &[StageType::Retention]),
    (
        StageType::Retention,
        &[StageType::Consideration, StageType::Conversion],
    ),
];

/// Stage types each journey category must contain.
pub const CATEGORY_REQUIREMENTS: &[(JourneyCategory, &[StageType])] = &[
    (
        JourneyCategory::ProductLaunch,
        &[
            StageType::Awareness,
            StageType::Consideration,
            StageType::Conversion,
        ],
    ),
    (
        JourneyCategory::LeadGeneration,
        &[
            StageType::Awareness,
            StageType::Consideration,
            StageType::Conversion,
        ],
    ),
    (
        JourneyCategory::ReEngagement,
        &[StageType::Retention, StageType::Conversion],
    ),
    (
        JourneyCategory::BrandAwareness,
        &[StageType::Awareness, StageType::Consideration],
    ),
];

/// Recommended stage order per journey category.
pub const OPTIMAL_SEQUENCES: &[(JourneyCategory, &[StageType])] = &[
    (
        JourneyCategory::ProductLaunch,
        &[
            StageType::Awareness,
            StageType::Consideration,
            StageType::Conversion,
            StageType::Retention,
        ],
    ),
    (
        JourneyCategory::LeadGeneration,
        &[
            StageType::Awareness,
            StageType::Consideration,
            StageType::Conversion,
        ],
    ),
    (
        JourneyCategory::ReEngagement,
        &[
            StageType::Retention,
            StageType::Consideration,
            StageType::Conversion,
        ],
    ),
    (
        JourneyCategory::BrandAwareness,
        &[
            StageType::Awareness,
            StageType::Consideration,
            StageType::Retention,
        ],
    ),
];

/// Channels and content types that usually suit a stage type.
#[derive(Debug, Clone, Copy)]
pub struct StageRecommendation {
    pub stage_type: StageType,
    pub channels: &'static [&'static str],
    pub content_types: &'static [&'static str],
}

pub const STAGE_RECOMMENDATIONS: &[StageRecommendation] = &[
    StageRecommendation {
        stage_type: StageType::Awareness,
        channels: &["social", "display", "search"],
        content_types: &["blog-post", "video", "infographic"],
    },
    StageRecommendation {
        stage_type: StageType::Consideration,
        channels: &["email", "webinar", "website"],
        content_types: &["case-study", "whitepaper", "comparison-guide"],
    },
    StageRecommendation {
        stage_type: StageType::Conversion,
        channels: &["email", "website", "sales"],
        content_types: &["demo", "free-trial", "pricing-page"],
    },
    StageRecommendation {
        stage_type: StageType::Retention,
        channels: &["email", "in-app", "sms"],
        content_types: &["newsletter", "onboarding-guide", "loyalty-offer"],
    },
];

fn lookup<K: PartialEq, V: Copy>(table: &[(K, V)], key: &K) -> Option<V> {
    table.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
}

/// Stage types that may directly follow `from`.
pub fn allowed_next(from: StageType) -> &'static [StageType] {
    lookup(TRANSITION_RULES, &from).unwrap_or(&[])
}

pub fn is_allowed_transition(from: StageType, to: StageType) -> bool {
    allowed_next(from).contains(&to)
}

pub fn required_stages(category: JourneyCategory) -> &'static [StageType] {
    lookup(CATEGORY_REQUIREMENTS, &category).unwrap_or(&[])
}

pub fn optimal_sequence(category: JourneyCategory) -> &'static [StageType] {
    lookup(OPTIMAL_SEQUENCES, &category).unwrap_or(&[])
}

pub fn recommendation_for(stage_type: StageType) -> Option<&'static StageRecommendation> {
    STAGE_RECOMMENDATIONS
        .iter()
        .find(|r| r.stage_type == stage_type)
}
