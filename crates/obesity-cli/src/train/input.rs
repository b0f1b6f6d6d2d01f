use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use obesity_core::config::ModelConfig;

/// Configuration for the `train` subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Path to the survey CSV (16 feature columns plus the target).
    pub data: String,
    /// Directory the four fitted artifacts are written into.
    pub artifacts_dir: String,
    /// Hold-out fraction for the evaluation split.
    pub test_fraction: f32,
    /// Seed for the shuffled hold-out split.
    pub seed: u64,
    pub model: ModelConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            data: String::from("Obesity.csv"),
            artifacts_dir: String::from("artifacts"),
            test_fraction: 0.2,
            seed: 42,
            model: ModelConfig::default(),
        }
    }
}

impl TrainConfig {
    pub fn from_arguments(config_path: &PathBuf, matches: &ArgMatches) -> Result<Self> {
        let config_json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let mut config: TrainConfig = serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        // Apply CLI overrides
        if let Some(data) = matches.get_one::<String>("data") {
            config.data = data.clone();
        }
        if let Some(artifacts) = matches.get_one::<String>("artifacts") {
            config.artifacts_dir = artifacts.clone();
        }
        if let Some(seed) = matches.get_one::<u64>("seed") {
            config.seed = *seed;
        }

        validate_csv_file(&config.data)?;
        Ok(config)
    }
}

pub fn validate_csv_file(path: &str) -> Result<()> {
    let pb = PathBuf::from(path);

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    if ext.as_deref() != Some("csv") {
        anyhow::bail!("File must have a .csv extension: {}", path);
    }
    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }
    Ok(())
}
