//! journey-check — validates a customer journey document and reports
//! errors, warnings, suggestions, completeness and readiness.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use campaign_core::config::AppConfig;
use campaign_journey::{
    JourneyCategory, JourneyValidator, Stage, ValidationDisplay, ValidationFinding,
};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "journey-check")]
#[command(about = "Validate a customer journey definition")]
#[command(version)]
struct Cli {
    /// Journey JSON file: a stage array or an object with `stages` and optional `category`
    file: PathBuf,

    /// Journey category (overrides the document's category)
    #[arg(long)]
    category: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Validate only the stage with this id
    #[arg(long, conflicts_with = "can_delete")]
    stage: Option<String>,

    /// Check whether the stage with this id can be deleted
    #[arg(long)]
    can_delete: Option<String>,

    /// Optional TOML config file
    #[arg(long, env = "CAMPAIGN_JOURNEY_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Object form of a journey document.
#[derive(Debug, Deserialize)]
struct JourneyFile {
    #[serde(default)]
    category: Option<JourneyCategory>,
    stages: Vec<Stage>,
}

/// Parses a bare stage array or a `{ "category", "stages" }` object.
/// The shape is picked first so deserialization errors keep their field,
/// line and column.
fn parse_document(raw: &str) -> anyhow::Result<(Vec<Stage>, Option<JourneyCategory>)> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    match value {
        serde_json::Value::Array(_) => Ok((serde_json::from_str::<Vec<Stage>>(raw)?, None)),
        serde_json::Value::Object(_) => {
            let file: JourneyFile = serde_json::from_str(raw)?;
            Ok((file.stages, file.category))
        }
        _ => anyhow::bail!("expected a stage array or a journey object"),
    }
}

fn init_tracing(config: &AppConfig, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_filter.as_str().into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_findings(findings: &[ValidationFinding], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(findings)?),
        OutputFormat::Text if findings.is_empty() => println!("Stage is valid"),
        OutputFormat::Text => {
            for finding in findings {
                println!("  - [{}] {}: {}", finding.id, finding.title, finding.message);
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // An explicit config file must load; otherwise fall back to defaults.
    let loaded = AppConfig::load_from(cli.config.as_deref());
    let config = match (&loaded, &cli.config) {
        (Ok(config), _) => config.clone(),
        (Err(e), Some(path)) => {
            anyhow::bail!("failed to load config {}: {}", path.display(), e)
        }
        (Err(_), None) => AppConfig::default(),
    };

    init_tracing(&config, cli.json_logs || config.log_json);
    if let Err(e) = &loaded {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    let raw = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;
    let (stages, doc_category) = parse_document(&raw)
        .with_context(|| format!("parsing journey JSON from {}", cli.file.display()))?;

    let category = match cli.category.as_deref() {
        Some(raw) => Some(raw.parse::<JourneyCategory>()?),
        None => doc_category,
    };

    info!(
        file = %cli.file.display(),
        stages = stages.len(),
        category = category.map(|c| c.as_str()),
        "Validating journey"
    );

    let validator = JourneyValidator::new(&config.validation);

    if let Some(stage_id) = cli.stage {
        let stage = stages
            .iter()
            .find(|s| s.id == stage_id)
            .with_context(|| format!("stage {} not found", stage_id))?;
        let errors = validator.validate_single_stage(stage);
        print_findings(&errors, cli.format)?;
        return Ok(if errors.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    if let Some(stage_id) = cli.can_delete {
        let check = validator.can_stage_be_deleted(&stages, &stage_id);
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&check)?),
            OutputFormat::Text if check.can_delete => println!("Stage {} can be deleted", stage_id),
            OutputFormat::Text => println!(
                "Stage {} cannot be deleted: {}",
                stage_id,
                check.reason.as_deref().unwrap_or("unknown reason")
            ),
        }
        return Ok(if check.can_delete {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    let result = validator.validate_journey(&stages, category);
    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print!("{}", ValidationDisplay::from_result(&result).render_text()),
    }

    Ok(if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
