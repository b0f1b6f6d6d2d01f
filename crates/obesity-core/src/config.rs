use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Central configuration for models in the crate.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ModelConfig {
    pub learning_rate: f32,

    #[serde(flatten)]
    pub model_type: ModelType,
}

/// Supported model types and their hyper-parameters.
///
/// `Gbdt` is the deployed classifier; `RandomForest` is the baseline used
/// by cross-validated evaluation.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum ModelType {
    Gbdt {
        max_depth: u32,
        num_boost_round: usize,
    },
    RandomForest {
        n_trees: u16,
        max_depth: Option<u16>,
        seed: u64,
    },
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::Gbdt {
            max_depth: 6,
            num_boost_round: 50,
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gbdt" => Ok(ModelType::Gbdt {
                max_depth: 6,
                num_boost_round: 50,
            }),
            "random_forest" | "forest" => Ok(ModelType::RandomForest {
                n_trees: 100,
                max_depth: None,
                seed: 42,
            }),
            _ => Err(format!(
                "Unknown model type: {}. Expected 'gbdt' or 'random_forest'",
                s
            )),
        }
    }
}

impl ModelConfig {
    pub fn new(learning_rate: f32, model_type: ModelType) -> Self {
        Self {
            learning_rate,
            model_type,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            model_type: ModelType::default(),
        }
    }
}
