//! Random Forest baseline on `smartcore`, used by cross-validated
//! evaluation. Not part of the deployed artifact set.

use anyhow::{anyhow, Context, Result};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::config::{ModelConfig, ModelType};
use crate::math::Array2;
use crate::models::classifier_trait::ClassifierModel;

pub struct ForestClassifier {
    model: Option<RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>>,
    params: ModelConfig,
}

impl ForestClassifier {
    pub fn new(params: ModelConfig) -> Self {
        ForestClassifier {
            model: None,
            params,
        }
    }

    fn to_dense(x: &Array2<f32>) -> DenseMatrix<f64> {
        let rows: Vec<Vec<f64>> = (0..x.nrows())
            .map(|r| x.row_slice(r).iter().map(|v| *v as f64).collect())
            .collect();
        DenseMatrix::from_2d_vec(&rows)
    }
}

impl ClassifierModel for ForestClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &[usize]) -> Result<()> {
        let ModelType::RandomForest {
            n_trees,
            max_depth,
            seed,
        } = self.params.model_type
        else {
            return Err(anyhow!("expected RandomForest model parameters"));
        };

        let dense = Self::to_dense(x);
        let labels: Vec<i32> = y.iter().map(|&v| v as i32).collect();

        // smartcore re-seeds every tree with the same seed, so random
        // per-split feature subsets would be identical across the whole
        // forest. Consider all features at each split instead.
        let mut parameters = RandomForestClassifierParameters::default()
            .with_n_trees(n_trees)
            .with_seed(seed)
            .with_m(x.ncols());
        if let Some(depth) = max_depth {
            parameters = parameters.with_max_depth(depth);
        }

        let model = RandomForestClassifier::fit(&dense, &labels, parameters)
            .context("random forest fit failed")?;
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &Array2<f32>) -> Result<Vec<usize>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("model has not been fitted"))?;
        let preds = model
            .predict(&Self::to_dense(x))
            .context("random forest predict failed")?;
        Ok(preds.into_iter().map(|v| v as usize).collect())
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}
