//! Deployed multiclass classifier: a one-vs-rest ensemble of gradient
//! boosted decision trees from the `gbdt` crate.
//!
//! Each of the 7 obesity classes gets one binary booster; inference takes
//! the argmax over the per-class scores. The fitted ensemble is serialized
//! as-is into the artifact store.

use anyhow::{anyhow, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{ModelConfig, ModelType};
use crate::math::Array2;
use crate::models::classifier_trait::ClassifierModel;

#[derive(Serialize, Deserialize)]
pub struct MulticlassGbdt {
    boosters: Vec<GBDT>,
    feature_size: usize,
    #[serde(skip)]
    params: ModelConfig,
}

impl MulticlassGbdt {
    pub fn new(params: ModelConfig) -> Self {
        MulticlassGbdt {
            boosters: Vec::new(),
            feature_size: 0,
            params,
        }
    }

    pub fn n_classes(&self) -> usize {
        self.boosters.len()
    }

    pub fn feature_size(&self) -> usize {
        self.feature_size
    }

    fn booster_config(&self, feature_size: usize) -> Result<Config> {
        let ModelType::Gbdt {
            max_depth,
            num_boost_round,
        } = &self.params.model_type
        else {
            return Err(anyhow!("expected Gbdt model parameters"));
        };

        let mut config = Config::new();
        config.set_feature_size(feature_size);
        config.set_shrinkage(self.params.learning_rate);
        config.set_max_depth(*max_depth);
        config.set_iterations(*num_boost_round);
        config.set_loss("LogLikelyhood");
        Ok(config)
    }

    /// Fit one binary booster per class, in parallel.
    pub fn fit_classes(&mut self, x: &Array2<f32>, y: &[usize], n_classes: usize) -> Result<()> {
        if y.len() != x.nrows() {
            return Err(anyhow!(
                "label count {} does not match row count {}",
                y.len(),
                x.nrows()
            ));
        }
        if n_classes < 2 {
            return Err(anyhow!("need at least 2 classes, got {}", n_classes));
        }
        let config = self.booster_config(x.ncols())?;

        let boosters: Vec<GBDT> = (0..n_classes)
            .into_par_iter()
            .map(|class| {
                // Binary one-vs-rest targets: 1 for the class, -1 for the rest.
                let mut train: DataVec = DataVec::new();
                for row in 0..x.nrows() {
                    let label = if y[row] == class { 1.0 } else { -1.0 };
                    train.push(Data::new_training_data(
                        x.row_slice(row).to_vec(),
                        1.0,
                        label,
                        None,
                    ));
                }
                let mut booster = GBDT::new(&config);
                booster.fit(&mut train);
                debug!("fitted one-vs-rest booster for class {}", class);
                booster
            })
            .collect();

        self.boosters = boosters;
        self.feature_size = x.ncols();
        Ok(())
    }

    /// Per-class scores for each row, shape (rows, classes).
    pub fn predict_scores(&self, x: &Array2<f32>) -> Result<Array2<f32>> {
        if self.boosters.is_empty() {
            return Err(anyhow!("model has not been fitted"));
        }
        if x.ncols() != self.feature_size {
            return Err(anyhow!(
                "feature vector has {} dimensions, classifier expects {}",
                x.ncols(),
                self.feature_size
            ));
        }

        let mut test: DataVec = DataVec::new();
        for row in 0..x.nrows() {
            test.push(Data::new_training_data(x.row_slice(row).to_vec(), 1.0, 0.0, None));
        }

        let n_classes = self.boosters.len();
        let mut scores = vec![0.0f32; x.nrows() * n_classes];
        for (class, booster) in self.boosters.iter().enumerate() {
            let preds = booster.predict(&test);
            for (row, p) in preds.iter().enumerate() {
                scores[row * n_classes + class] = *p;
            }
        }

        Ok(Array2::from_shape_vec((x.nrows(), n_classes), scores)?)
    }

    /// Predicted class index per row: argmax over the one-vs-rest scores.
    pub fn predict_classes(&self, x: &Array2<f32>) -> Result<Vec<usize>> {
        let scores = self.predict_scores(x)?;
        let mut out = Vec::with_capacity(scores.nrows());
        for row in 0..scores.nrows() {
            let slice = scores.row_slice(row);
            let best = slice
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(i, _)| i)
                .unwrap_or(0);
            out.push(best);
        }
        Ok(out)
    }
}

impl ClassifierModel for MulticlassGbdt {
    fn fit(&mut self, x: &Array2<f32>, y: &[usize]) -> Result<()> {
        let n_classes = y.iter().copied().max().map(|m| m + 1).unwrap_or(0);
        self.fit_classes(x, y, n_classes)
    }

    fn predict(&self, x: &Array2<f32>) -> Result<Vec<usize>> {
        self.predict_classes(x)
    }

    fn name(&self) -> &'static str {
        "gbdt"
    }
}
