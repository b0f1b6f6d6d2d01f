//! Fitted label encoders: categorical token <-> integer code bijections.
//!
//! Fitting sorts the unique tokens seen in training data; a token's code is
//! its rank in that ordering, matching the label-encoding convention the
//! deployed model was trained with. Encoders are immutable after fitting.

use serde::{Deserialize, Serialize};

fn sorted_unique<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut classes: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    classes.sort_unstable();
    classes.dedup();
    classes
}

/// Immutable bijection from a finite token vocabulary to integer codes.
/// One per categorical feature field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalEncoder {
    classes: Vec<String>,
}

impl CategoricalEncoder {
    /// Fit from training tokens: sorted unique values, code = rank.
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        CategoricalEncoder {
            classes: sorted_unique(values),
        }
    }

    /// Code for a token, or `None` when the token is outside the fitted
    /// vocabulary. Callers turn `None` into an unknown-category error.
    pub fn encode(&self, token: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(token))
            .ok()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Immutable bijection between class indices and obesity class labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDecoder {
    classes: Vec<String>,
}

impl TargetDecoder {
    /// Fit from the training target column: sorted unique labels.
    pub fn fit<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        TargetDecoder {
            classes: sorted_unique(labels),
        }
    }

    /// Class label for a predicted index.
    pub fn decode(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(|s| s.as_str())
    }

    /// Class index for a label. Used when encoding the training target.
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .ok()
    }

    pub fn labels(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}
