//! Survey dataset CSV reader.
//!
//! Reads the tabular training dataset: the 16 feature columns of the
//! canonical schema plus the `Obesity` target column. Columns are located
//! by header name, so extra columns and arbitrary column order are fine.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::encoding::CategoricalEncoder;
use crate::math::Array2;
use crate::preprocessing::Scaler;
use crate::schema::{CATEGORICAL_FIELDS, FIELD_ORDER, NUMERIC_FIELDS, TARGET_COLUMN};

/// Loaded survey data, split by column kind in schema order.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Raw categorical tokens, one inner vector per `CATEGORICAL_FIELDS` entry.
    pub categorical: Vec<Vec<String>>,
    /// Numeric matrix, columns in `NUMERIC_FIELDS` order.
    pub numeric: Array2<f32>,
    /// Raw target labels.
    pub target: Vec<String>,
}

impl Dataset {
    pub fn n_rows(&self) -> usize {
        self.target.len()
    }

    /// Raw tokens of one categorical field.
    pub fn categorical_column(&self, field: &str) -> &[String] {
        let idx = CATEGORICAL_FIELDS
            .iter()
            .position(|f| *f == field)
            .unwrap_or_else(|| panic!("not a categorical field: {}", field));
        &self.categorical[idx]
    }

    /// Encode the full dataset into the fixed 16-column feature matrix the
    /// classifiers consume: categorical codes from the fitted encoders and
    /// scaled numerics, interleaved in training field order.
    pub fn encode(
        &self,
        encoders: &BTreeMap<String, CategoricalEncoder>,
        scaler: &Scaler,
    ) -> Result<Array2<f32>> {
        let scaled = scaler.transform(&self.numeric);
        let n = self.n_rows();

        let mut data = Vec::with_capacity(n * FIELD_ORDER.len());
        for row in 0..n {
            for field in FIELD_ORDER {
                if let Some(cat_idx) = CATEGORICAL_FIELDS.iter().position(|f| *f == field) {
                    let token = &self.categorical[cat_idx][row];
                    let encoder = encoders
                        .get(field)
                        .ok_or_else(|| anyhow!("no fitted encoder for field {}", field))?;
                    let code = encoder.encode(token).ok_or_else(|| {
                        anyhow!("token '{}' in row {} unknown to the {} encoder", token, row, field)
                    })?;
                    data.push(code as f32);
                } else {
                    let num_idx = NUMERIC_FIELDS
                        .iter()
                        .position(|f| *f == field)
                        .expect("field must be categorical or numeric");
                    data.push(scaled[(row, num_idx)]);
                }
            }
        }

        Ok(Array2::from_shape_vec((n, FIELD_ORDER.len()), data)?)
    }
}

/// Read the survey dataset from a CSV file.
pub fn read_survey_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open dataset: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read dataset header row")?
        .clone();

    let categorical_idx = CATEGORICAL_FIELDS
        .iter()
        .map(|field| find_column(&headers, field))
        .collect::<Result<Vec<_>>>()?;
    let numeric_idx = NUMERIC_FIELDS
        .iter()
        .map(|field| find_column(&headers, field))
        .collect::<Result<Vec<_>>>()?;
    let target_idx = find_column(&headers, TARGET_COLUMN)?;

    let mut categorical: Vec<Vec<String>> = vec![Vec::new(); CATEGORICAL_FIELDS.len()];
    let mut numeric_data: Vec<f32> = Vec::new();
    let mut target: Vec<String> = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        for (col, idx) in categorical_idx.iter().enumerate() {
            categorical[col].push(get_field(&record, *idx, row_idx)?.to_string());
        }
        for (field, idx) in NUMERIC_FIELDS.iter().zip(numeric_idx.iter()) {
            let raw = get_field(&record, *idx, row_idx)?;
            let value = raw.trim().parse::<f32>().with_context(|| {
                format!("Invalid numeric value '{}' for {} at row {}", raw, field, row_idx + 1)
            })?;
            numeric_data.push(value);
        }
        target.push(get_field(&record, target_idx, row_idx)?.to_string());
    }

    if target.is_empty() {
        return Err(anyhow!("Dataset contains no rows"));
    }

    let n = target.len();
    let numeric = Array2::from_shape_vec((n, NUMERIC_FIELDS.len()), numeric_data)?;

    Ok(Dataset {
        categorical,
        numeric,
        target,
    })
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| anyhow!("Missing column '{}' in dataset header", name))
}

fn get_field<'a>(record: &'a StringRecord, idx: usize, row_idx: usize) -> Result<&'a str> {
    record
        .get(idx)
        .ok_or_else(|| anyhow!("Missing value in column {} at row {}", idx, row_idx + 1))
}
