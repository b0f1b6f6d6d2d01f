//! The stateless request pipeline: translate -> encode -> predict ->
//! decode -> explain.
//!
//! A `Pipeline` owns the loaded artifact bundle and never mutates it; one
//! instance can serve any number of requests, concurrently if the host
//! wants to. Every stage returns a typed error and any failure
//! short-circuits the request with no partial result.

use log::error;

use crate::artifacts::ArtifactBundle;
use crate::error::PipelineError;
use crate::explain::explain;
use crate::math::Array2;
use crate::schema::{InputRecord, CATEGORICAL_FIELDS, FIELD_ORDER, NUMERIC_FIELDS};
use crate::translate::canonicalize;

/// Number of dimensions in the encoded feature vector.
pub const FEATURE_COUNT: usize = FIELD_ORDER.len();

/// Outcome of one successful request.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub explanation: String,
}

pub struct Pipeline {
    bundle: ArtifactBundle,
}

impl Pipeline {
    pub fn new(bundle: ArtifactBundle) -> Self {
        Pipeline { bundle }
    }

    /// Load the four artifacts from a directory. Failure here is fatal for
    /// the serving process; no requests may be accepted without artifacts.
    pub fn load<P: AsRef<std::path::Path>>(dir: P) -> Result<Self, PipelineError> {
        Ok(Pipeline::new(ArtifactBundle::load(dir)?))
    }

    pub fn artifacts(&self) -> &ArtifactBundle {
        &self.bundle
    }

    /// Encode a canonical record into the fixed-order feature vector:
    /// categorical codes from the per-field encoders, the 8 numeric fields
    /// scaled jointly, interleaved in training field order.
    pub fn encode(&self, record: &InputRecord) -> Result<[f32; FEATURE_COUNT], PipelineError> {
        let scaled = self.bundle.scaler.transform_row(&record.numeric_values());

        let mut vector = [0.0f32; FEATURE_COUNT];
        for (slot, field) in vector.iter_mut().zip(FIELD_ORDER) {
            if CATEGORICAL_FIELDS.contains(&field) {
                let token = record.categorical(field);
                let encoder = self.bundle.encoders.get(field).ok_or_else(|| {
                    PipelineError::ArtifactLoad(format!("no encoder for field {}", field))
                })?;
                let code =
                    encoder
                        .encode(token)
                        .ok_or_else(|| PipelineError::UnknownCategory {
                            field,
                            value: token.to_string(),
                        })?;
                *slot = code as f32;
            } else {
                let num_idx = NUMERIC_FIELDS
                    .iter()
                    .position(|f| *f == field)
                    .expect("field must be categorical or numeric");
                *slot = scaled[num_idx];
            }
        }
        Ok(vector)
    }

    /// Run the classifier on an encoded vector and decode the class index.
    pub fn predict(&self, vector: &[f32; FEATURE_COUNT]) -> Result<String, PipelineError> {
        let x = Array2::from_shape_vec((1, FEATURE_COUNT), vector.to_vec())
            .map_err(|e| PipelineError::Inference(e.to_string()))?;

        let indices = self.bundle.classifier.predict_classes(&x).map_err(|e| {
            // A shape or contract rejection here is a configuration defect,
            // not a user-input problem. Log it distinctly.
            error!("classifier rejected encoded vector: {:#}", e);
            PipelineError::Inference(e.to_string())
        })?;

        let index = indices[0];
        self.bundle
            .target
            .decode(index)
            .map(|label| label.to_string())
            .ok_or_else(|| {
                error!("classifier produced out-of-range class index {}", index);
                PipelineError::Inference(format!("class index {} has no label", index))
            })
    }

    /// One full request: collect -> translate -> encode -> predict ->
    /// explain. Stateless; deterministic for fixed artifacts, so failures
    /// are never retried.
    pub fn run(&self, raw: &InputRecord) -> Result<Prediction, PipelineError> {
        let canonical = canonicalize(raw)?;
        let vector = self.encode(&canonical)?;
        let label = self.predict(&vector)?;
        let explanation = explain(&label).to_string();
        Ok(Prediction { label, explanation })
    }
}
