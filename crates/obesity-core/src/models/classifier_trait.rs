use anyhow::Result;

use crate::math::Array2;

/// A small trait abstraction over the multiclass classifiers used by
/// training and evaluation. Labels are class indices in `[0, n_classes)`.
pub trait ClassifierModel {
    /// Fit the model on an encoded feature matrix.
    fn fit(&mut self, x: &Array2<f32>, y: &[usize]) -> Result<()>;

    /// Predict class indices, one per input row.
    fn predict(&self, x: &Array2<f32>) -> Result<Vec<usize>>;

    /// Human readable name for the model.
    fn name(&self) -> &'static str {
        "classifier"
    }
}
