//! Numeric standardization.
//!
//! Provides a `Scaler` for per-column mean/std standardization, fitted once
//! over the training matrix and applied read-only afterwards, both to full
//! matrices (training, evaluation) and to single rows (inference).

use serde::{Deserialize, Serialize};

use crate::math::Array2;

/// Fitted per-column standard scaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f32>,
    pub std: Vec<f32>,
}

impl Scaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f32 = 1e-6;

    /// Fit a scaler from a matrix where rows are samples and columns are
    /// the numeric features in schema order.
    pub fn fit(x: &Array2<f32>) -> Scaler {
        let (nrows, ncols) = x.shape();
        assert!(nrows > 0 && ncols > 0, "Scaler::fit requires a non-empty matrix");

        let nrows_f = nrows as f32;
        let mut mean = vec![0.0f32; ncols];
        for r in 0..nrows {
            for (c, m) in mean.iter_mut().enumerate() {
                *m += x[(r, c)];
            }
        }
        for m in mean.iter_mut() {
            *m /= nrows_f;
        }

        let mut std = vec![0.0f32; ncols];
        for r in 0..nrows {
            for (c, v) in std.iter_mut().enumerate() {
                let d = x[(r, c)] - mean[c];
                *v += d * d;
            }
        }
        for v in std.iter_mut() {
            *v = (*v / nrows_f).sqrt().max(Self::MIN_STD);
        }

        Scaler { mean, std }
    }

    /// Number of columns the scaler was fitted on.
    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// Standardize a single row, all columns at once. The row length must
    /// match the fitted width.
    pub fn transform_row(&self, row: &[f32]) -> Vec<f32> {
        assert_eq!(
            row.len(),
            self.width(),
            "row width does not match fitted scaler"
        );
        row.iter()
            .zip(self.mean.iter().zip(self.std.iter()))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }

    /// Standardize all rows of a matrix, returning a new matrix.
    pub fn transform(&self, x: &Array2<f32>) -> Array2<f32> {
        let (nrows, ncols) = x.shape();
        assert_eq!(ncols, self.width(), "matrix width does not match fitted scaler");

        let mut out = Vec::with_capacity(nrows * ncols);
        for r in 0..nrows {
            out.extend(self.transform_row(x.row_slice(r)));
        }
        Array2::from_shape_vec((nrows, ncols), out).expect("transform: shape mismatch")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_computes_mean_and_std() {
        let x = Array2::from_shape_vec((4, 2), vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0])
            .unwrap();
        let sc = Scaler::fit(&x);
        assert!((sc.mean[0] - 2.5).abs() < 1e-5);
        assert!((sc.mean[1] - 25.0).abs() < 1e-5);
        assert!(sc.std[0] > 0.0 && sc.std[1] > 0.0);
    }

    #[test]
    fn transform_row_matches_batch_transform() {
        let x = Array2::from_shape_vec((3, 2), vec![1.0, -1.0, 2.0, 0.0, 3.0, 1.0]).unwrap();
        let sc = Scaler::fit(&x);
        let t = sc.transform(&x);
        for r in 0..3 {
            let row = sc.transform_row(x.row_slice(r));
            assert_eq!(row.as_slice(), t.row_slice(r));
        }
    }

    #[test]
    fn constant_column_does_not_divide_by_zero() {
        let x = Array2::from_shape_vec((3, 1), vec![5.0, 5.0, 5.0]).unwrap();
        let sc = Scaler::fit(&x);
        let row = sc.transform_row(&[5.0]);
        assert!(row[0].abs() < 1e-2, "constant column should map to ~0");
    }
}
