use std::path::Path;

use serde::Deserialize;

use crate::error::{CampaignError, CampaignResult};

/// Root application configuration. Loaded from environment variables
/// with the prefix `CAMPAIGN_JOURNEY__` and an optional TOML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub log_json: bool,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Thresholds consumed by the journey validator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidationConfig {
    /// Soft cap on stage count; exceeding it only warns.
    #[serde(default = "default_max_stages")]
    pub max_stages: usize,
    #[serde(default = "default_min_description_length")]
    pub min_description_length: usize,
    /// Positional match ratio below which a reorder is suggested.
    #[serde(default = "default_sequence_match_threshold")]
    pub sequence_match_threshold: f64,
    #[serde(default = "default_min_distinct_channels")]
    pub min_distinct_channels: usize,
    #[serde(default = "default_min_distinct_content_types")]
    pub min_distinct_content_types: usize,
    /// A/B testing is suggested once configured stages exceed this count.
    #[serde(default = "default_ab_test_min_configured")]
    pub ab_test_min_configured: usize,
}

// Default functions
fn default_log_filter() -> String {
    "journey_check=info,campaign_journey=info".to_string()
}
fn default_max_stages() -> usize {
    10
}
fn default_min_description_length() -> usize {
    20
}
fn default_sequence_match_threshold() -> f64 {
    0.7
}
fn default_min_distinct_channels() -> usize {
    3
}
fn default_min_distinct_content_types() -> usize {
    4
}
fn default_ab_test_min_configured() -> usize {
    2
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_stages: default_max_stages(),
            min_description_length: default_min_description_length(),
            sequence_match_threshold: default_sequence_match_threshold(),
            min_distinct_channels: default_min_distinct_channels(),
            min_distinct_content_types: default_min_distinct_content_types(),
            ab_test_min_configured: default_ab_test_min_configured(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            log_json: false,
            validation: ValidationConfig::default(),
        }
    }
}

impl ValidationConfig {
    /// Rejects threshold combinations the validator cannot interpret.
    pub fn validate(&self) -> CampaignResult<()> {
        if !(0.0..=1.0).contains(&self.sequence_match_threshold) {
            return Err(CampaignError::Config(format!(
                "sequence_match_threshold must be within 0.0..=1.0, got {}",
                self.sequence_match_threshold
            )));
        }
        if self.max_stages == 0 {
            return Err(CampaignError::Config(
                "max_stages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from an optional config file, with environment
    /// variables taking precedence.
    pub fn load_from(path: Option<&Path>) -> CampaignResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let builder = builder.add_source(
            config::Environment::with_prefix("CAMPAIGN_JOURNEY")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validation.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_defaults() {
        let config = ValidationConfig::default();
        assert_eq!(config.max_stages, 10);
        assert_eq!(config.min_description_length, 20);
        assert!((config.sequence_match_threshold - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.min_distinct_channels, 3);
        assert_eq!(config.min_distinct_content_types, 4);
        assert_eq!(config.ab_test_min_configured, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let config = ValidationConfig {
            sequence_match_threshold: 1.5,
            ..ValidationConfig::default()
        };
        assert!(matches!(config.validate(), Err(CampaignError::Config(_))));
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"validation": {"max_stages": 6}}"#).unwrap();
        assert_eq!(config.validation.max_stages, 6);
        assert_eq!(config.validation.min_distinct_channels, 3);
        assert!(!config.log_json);
    }

    #[test]
    fn test_load_from_toml_file() {
        let path =
            std::env::temp_dir().join(format!("journey-config-{}.toml", std::process::id()));
        std::fs::write(&path, "log_json = true\n\n[validation]\nmax_stages = 7\n").unwrap();
        let loaded = AppConfig::load_from(Some(&path));
        std::fs::remove_file(&path).ok();

        let config = loaded.unwrap();
        assert_eq!(config.validation.max_stages, 7);
        assert_eq!(config.validation.min_description_length, 20);
        assert!(config.log_json);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let path = std::env::temp_dir().join("journey-config-does-not-exist.toml");
        assert!(matches!(
            AppConfig::load_from(Some(&path)),
            Err(CampaignError::Config(_))
        ));
    }
}
