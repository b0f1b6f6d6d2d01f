//! Artifact store for the four fitted objects the inference pipeline
//! consumes: per-field categorical encoders, the numeric scaler, the
//! deployed classifier, and the target decoder.
//!
//! Artifacts are written once by the training command and loaded read-only
//! at process start. Loading is idempotent; loaded bundles are never
//! mutated. The on-disk representation is opaque serialized objects plus a
//! small manifest.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::encoding::{CategoricalEncoder, TargetDecoder};
use crate::error::PipelineError;
use crate::models::gbdt::MulticlassGbdt;
use crate::preprocessing::Scaler;
use crate::schema::{CATEGORICAL_FIELDS, FIELD_ORDER, NUMERIC_FIELDS};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const ENCODERS_FILE: &str = "encoders.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const MODEL_FILE: &str = "model.json";
pub const TARGET_FILE: &str = "target_encoder.json";

const SCHEMA_VERSION: u32 = 1;

/// Summary written next to the serialized artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    pub feature_order: Vec<String>,
    pub n_classes: usize,
}

/// The four fitted artifacts, produced offline and shared read-only by
/// every request.
pub struct ArtifactBundle {
    pub encoders: BTreeMap<String, CategoricalEncoder>,
    pub scaler: Scaler,
    pub classifier: MulticlassGbdt,
    pub target: TargetDecoder,
}

impl ArtifactBundle {
    /// Persist the bundle into `dir`, creating it if needed.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create artifact dir {}", dir.display()))?;

        let manifest = Manifest {
            schema_version: SCHEMA_VERSION,
            created_at: Utc::now(),
            feature_order: FIELD_ORDER.iter().map(|f| f.to_string()).collect(),
            n_classes: self.target.n_classes(),
        };

        write_json(dir.join(MANIFEST_FILE), &manifest)?;
        write_json(dir.join(ENCODERS_FILE), &self.encoders)?;
        write_json(dir.join(SCALER_FILE), &self.scaler)?;
        write_json(dir.join(MODEL_FILE), &self.classifier)?;
        write_json(dir.join(TARGET_FILE), &self.target)?;
        Ok(())
    }

    /// Load a bundle from `dir` and sanity-check it against the schema.
    /// Any missing or corrupt file is a fatal `ArtifactLoad` error.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, PipelineError> {
        let dir = dir.as_ref();

        let manifest: Manifest = read_json(dir.join(MANIFEST_FILE))?;
        if manifest.schema_version != SCHEMA_VERSION {
            return Err(PipelineError::ArtifactLoad(format!(
                "unsupported artifact schema version {}",
                manifest.schema_version
            )));
        }
        if manifest
            .feature_order
            .iter()
            .map(String::as_str)
            .ne(FIELD_ORDER)
        {
            return Err(PipelineError::ArtifactLoad(
                "artifact feature order does not match the schema".to_string(),
            ));
        }

        let encoders: BTreeMap<String, CategoricalEncoder> = read_json(dir.join(ENCODERS_FILE))?;
        let scaler: Scaler = read_json(dir.join(SCALER_FILE))?;
        let classifier: MulticlassGbdt = read_json(dir.join(MODEL_FILE))?;
        let target: TargetDecoder = read_json(dir.join(TARGET_FILE))?;

        let bundle = ArtifactBundle {
            encoders,
            scaler,
            classifier,
            target,
        };
        bundle.check_contracts(&manifest)?;
        Ok(bundle)
    }

    /// Cross-checks between artifacts: the encoder set must cover every
    /// categorical field, and vector widths must match the classifier.
    fn check_contracts(&self, manifest: &Manifest) -> Result<(), PipelineError> {
        for field in CATEGORICAL_FIELDS {
            if !self.encoders.contains_key(field) {
                return Err(PipelineError::ArtifactLoad(format!(
                    "no categorical encoder for field {}",
                    field
                )));
            }
        }
        if self.scaler.width() != NUMERIC_FIELDS.len() {
            return Err(PipelineError::ArtifactLoad(format!(
                "scaler covers {} columns, expected {}",
                self.scaler.width(),
                NUMERIC_FIELDS.len()
            )));
        }
        if self.classifier.feature_size() != FIELD_ORDER.len() {
            return Err(PipelineError::ArtifactLoad(format!(
                "classifier expects {} features, schema has {}",
                self.classifier.feature_size(),
                FIELD_ORDER.len()
            )));
        }
        if self.classifier.n_classes() != self.target.n_classes()
            || manifest.n_classes != self.target.n_classes()
        {
            return Err(PipelineError::ArtifactLoad(
                "classifier and target decoder disagree on the class count".to_string(),
            ));
        }
        Ok(())
    }
}

fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize {}", path.as_ref().display()))?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;
    Ok(())
}

fn read_json<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> Result<T, PipelineError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| PipelineError::ArtifactLoad(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| PipelineError::ArtifactLoad(format!("{}: {}", path.display(), e)))
}
