use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use obesity_core::config::{ModelConfig, ModelType};

use crate::train::input::validate_csv_file;

/// Configuration for the `validate` subcommand (cross-validated baseline).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    pub data: String,
    /// Number of cross-validation folds.
    pub folds: usize,
    /// Seed for the shuffled fold assignment.
    pub seed: u64,
    pub model: ModelConfig,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        ValidateConfig {
            data: String::from("Obesity.csv"),
            folds: 5,
            seed: 42,
            model: ModelConfig::new(
                0.1,
                ModelType::RandomForest {
                    n_trees: 100,
                    max_depth: None,
                    seed: 42,
                },
            ),
        }
    }
}

impl ValidateConfig {
    pub fn from_arguments(config_path: &PathBuf, matches: &ArgMatches) -> Result<Self> {
        let config_json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let mut config: ValidateConfig = serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        // Apply CLI overrides
        if let Some(data) = matches.get_one::<String>("data") {
            config.data = data.clone();
        }
        if let Some(folds) = matches.get_one::<usize>("folds") {
            config.folds = *folds;
        }

        if config.folds < 2 {
            anyhow::bail!("Cross-validation needs at least 2 folds");
        }
        validate_csv_file(&config.data)?;
        Ok(config)
    }
}
