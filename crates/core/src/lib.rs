//! Shared foundations for the journey tooling: error type and layered
//! configuration.

pub mod config;
pub mod error;

pub use config::{AppConfig, ValidationConfig};
pub use error::{CampaignError, CampaignResult};
