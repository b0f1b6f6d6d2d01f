//! The `validate` runner: k-fold cross-validation of the Random Forest
//! baseline over the encoded dataset.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use log::info;

use obesity_core::encoding::{CategoricalEncoder, TargetDecoder};
use obesity_core::eval::cross_validate;
use obesity_core::io::read_survey_csv;
use obesity_core::preprocessing::Scaler;
use obesity_core::schema::CATEGORICAL_FIELDS;

use crate::validate::input::ValidateConfig;

pub fn run_validation(config: &ValidateConfig) -> Result<()> {
    let dataset = read_survey_csv(&config.data)?;
    info!("loaded {} rows from {}", dataset.n_rows(), config.data);

    let mut encoders = BTreeMap::new();
    for field in CATEGORICAL_FIELDS {
        let tokens = dataset.categorical_column(field).iter().map(|s| s.as_str());
        encoders.insert(field.to_string(), CategoricalEncoder::fit(tokens));
    }
    let target = TargetDecoder::fit(dataset.target.iter().map(|s| s.as_str()));
    let scaler = Scaler::fit(&dataset.numeric);

    let x = dataset.encode(&encoders, &scaler)?;
    let y = dataset
        .target
        .iter()
        .map(|label| {
            target
                .encode(label)
                .with_context(|| format!("target label '{}' missing from decoder", label))
        })
        .collect::<Result<Vec<_>>>()?;

    let result = cross_validate(
        &config.model,
        &x,
        &y,
        target.n_classes(),
        config.folds,
        config.seed,
    )?;
    let mean = result.mean();

    println!("Cross-validation results ({}-fold):", config.folds);
    println!("Mean accuracy:          {:.4}", mean.accuracy);
    println!("Mean precision (macro): {:.4}", mean.precision_macro);
    println!("Mean recall (macro):    {:.4}", mean.recall_macro);
    println!("Mean F1-score (macro):  {:.4}", mean.f1_macro);

    Ok(())
}
