//! Model evaluation: seeded splits, k-fold cross-validation, and
//! multiclass metrics (accuracy, macro precision/recall/F1) computed from
//! a confusion matrix.

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::ModelConfig;
use crate::math::Array2;
use crate::models::build_model;

/// Aggregate multiclass metrics, macro-averaged over classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision_macro: f64,
    pub recall_macro: f64,
    pub f1_macro: f64,
}

/// Per-class row of a classification report.
#[derive(Debug, Clone)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Shuffled train/test split of row indices with a fixed seed.
pub fn train_test_split_indices(n: usize, test_fraction: f32, seed: u64) -> (Vec<usize>, Vec<usize>) {
    assert!(
        test_fraction > 0.0 && test_fraction < 1.0,
        "test_fraction must be in (0, 1)"
    );
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);

    let n_test = ((n as f32) * test_fraction).round() as usize;
    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();
    (train, test)
}

/// Shuffled k-fold partition of row indices. Every index appears in
/// exactly one fold; fold sizes differ by at most one. Fails when the
/// dataset has fewer rows than folds.
pub fn kfold_indices(n: usize, k: usize, seed: u64) -> Result<Vec<Vec<usize>>> {
    if k < 2 || k > n {
        return Err(anyhow!(
            "cannot split {} rows into {} folds; need 2 <= folds <= rows",
            n,
            k
        ));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);

    let mut folds: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (i, idx) in indices.into_iter().enumerate() {
        folds[i % k].push(idx);
    }
    Ok(folds)
}

/// Row-normalized confusion counts: entry (t, p) counts rows with true
/// class t predicted as p.
pub fn confusion_matrix(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Array2<usize> {
    assert_eq!(y_true.len(), y_pred.len(), "label vectors must align");
    let mut counts =
        Array2::from_shape_vec((n_classes, n_classes), vec![0usize; n_classes * n_classes])
            .expect("confusion matrix shape");
    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        counts[(t, p)] += 1;
    }
    counts
}

fn per_class(confusion: &Array2<usize>) -> Vec<(f64, f64, f64, usize)> {
    let k = confusion.nrows();
    let mut out = Vec::with_capacity(k);
    for class in 0..k {
        let tp = confusion[(class, class)];
        let predicted: usize = (0..k).map(|t| confusion[(t, class)]).sum();
        let actual: usize = confusion.row_slice(class).iter().sum();

        let precision = if predicted > 0 {
            tp as f64 / predicted as f64
        } else {
            0.0
        };
        let recall = if actual > 0 { tp as f64 / actual as f64 } else { 0.0 };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        out.push((precision, recall, f1, actual));
    }
    out
}

/// Accuracy plus macro-averaged precision/recall/F1 over all classes.
pub fn macro_metrics(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Metrics {
    let confusion = confusion_matrix(y_true, y_pred, n_classes);
    let rows = per_class(&confusion);

    let correct: usize = (0..n_classes).map(|c| confusion[(c, c)]).sum();
    let total = y_true.len();
    let k = n_classes as f64;

    Metrics {
        accuracy: if total > 0 { correct as f64 / total as f64 } else { 0.0 },
        precision_macro: rows.iter().map(|r| r.0).sum::<f64>() / k,
        recall_macro: rows.iter().map(|r| r.1).sum::<f64>() / k,
        f1_macro: rows.iter().map(|r| r.2).sum::<f64>() / k,
    }
}

/// Per-class precision/recall/F1/support rows, in label order.
pub fn class_report(y_true: &[usize], y_pred: &[usize], labels: &[String]) -> Vec<ClassMetrics> {
    let confusion = confusion_matrix(y_true, y_pred, labels.len());
    per_class(&confusion)
        .into_iter()
        .zip(labels.iter())
        .map(|((precision, recall, f1, support), label)| ClassMetrics {
            label: label.clone(),
            precision,
            recall,
            f1,
            support,
        })
        .collect()
}

/// Render a classification report as a printable table.
pub fn format_class_report(rows: &[ClassMetrics], metrics: &Metrics) -> String {
    let mut out = String::new();
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(5).max(5);
    out.push_str(&format!(
        "{:width$}  {:>9}  {:>9}  {:>9}  {:>7}\n",
        "class",
        "precision",
        "recall",
        "f1",
        "support",
        width = width
    ));
    for row in rows {
        out.push_str(&format!(
            "{:width$}  {:>9.4}  {:>9.4}  {:>9.4}  {:>7}\n",
            row.label,
            row.precision,
            row.recall,
            row.f1,
            row.support,
            width = width
        ));
    }
    out.push_str(&format!("\naccuracy: {:.4}\n", metrics.accuracy));
    out
}

/// Per-fold metrics from k-fold cross-validation.
#[derive(Debug, Clone)]
pub struct CrossValidation {
    pub folds: Vec<Metrics>,
}

impl CrossValidation {
    /// Mean of each metric across folds.
    pub fn mean(&self) -> Metrics {
        let k = self.folds.len() as f64;
        Metrics {
            accuracy: self.folds.iter().map(|m| m.accuracy).sum::<f64>() / k,
            precision_macro: self.folds.iter().map(|m| m.precision_macro).sum::<f64>() / k,
            recall_macro: self.folds.iter().map(|m| m.recall_macro).sum::<f64>() / k,
            f1_macro: self.folds.iter().map(|m| m.f1_macro).sum::<f64>() / k,
        }
    }
}

/// k-fold cross-validation of a model built fresh from `config` for every
/// fold: fit on k-1 folds, score the held-out fold.
pub fn cross_validate(
    config: &ModelConfig,
    x: &Array2<f32>,
    y: &[usize],
    n_classes: usize,
    k: usize,
    seed: u64,
) -> Result<CrossValidation> {
    if y.len() != x.nrows() {
        return Err(anyhow!(
            "label count {} does not match row count {}",
            y.len(),
            x.nrows()
        ));
    }

    let folds = kfold_indices(x.nrows(), k, seed)?;
    let mut results = Vec::with_capacity(k);

    for (fold_idx, test_idx) in folds.iter().enumerate() {
        let train_idx: Vec<usize> = folds
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != fold_idx)
            .flat_map(|(_, fold)| fold.iter().copied())
            .collect();

        let x_train = x.select_rows(&train_idx);
        let y_train: Vec<usize> = train_idx.iter().map(|&i| y[i]).collect();
        let x_test = x.select_rows(test_idx);
        let y_test: Vec<usize> = test_idx.iter().map(|&i| y[i]).collect();

        let mut model = build_model(config.clone());
        model.fit(&x_train, &y_train)?;
        let y_pred = model.predict(&x_test)?;

        let metrics = macro_metrics(&y_test, &y_pred, n_classes);
        log::info!(
            "fold {}: accuracy {:.4}, f1_macro {:.4}",
            fold_idx + 1,
            metrics.accuracy,
            metrics.f1_macro
        );
        results.push(metrics);
    }

    Ok(CrossValidation { folds: results })
}
