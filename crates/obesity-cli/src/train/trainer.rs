//! The `train` runner: fit the four artifacts from the survey dataset,
//! report hold-out performance, and persist the artifact bundle.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use log::info;

use obesity_core::artifacts::ArtifactBundle;
use obesity_core::encoding::{CategoricalEncoder, TargetDecoder};
use obesity_core::eval::{class_report, format_class_report, macro_metrics, train_test_split_indices};
use obesity_core::io::read_survey_csv;
use obesity_core::models::gbdt::MulticlassGbdt;
use obesity_core::models::ClassifierModel;
use obesity_core::preprocessing::Scaler;
use obesity_core::schema::CATEGORICAL_FIELDS;

use crate::train::input::TrainConfig;

pub fn run_training(config: &TrainConfig) -> Result<()> {
    let dataset = read_survey_csv(&config.data)?;
    info!(
        "loaded {} rows from {}",
        dataset.n_rows(),
        config.data
    );

    // Fit the preprocessing artifacts on the full dataset, as the deployed
    // encoders must know every token the form can produce.
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

    let (train_idx, test_idx) =
        train_test_split_indices(x.nrows(), config.test_fraction, config.seed);
    let x_train = x.select_rows(&train_idx);
    let y_train: Vec<usize> = train_idx.iter().map(|&i| y[i]).collect();
    let x_test = x.select_rows(&test_idx);
    let y_test: Vec<usize> = test_idx.iter().map(|&i| y[i]).collect();

    info!(
        "training on {} rows, holding out {} for evaluation",
        x_train.nrows(),
        x_test.nrows()
    );

    let mut classifier = MulticlassGbdt::new(config.model.clone());
    classifier.fit_classes(&x_train, &y_train, target.n_classes())?;

    let y_pred = classifier.predict(&x_test)?;
    let metrics = macro_metrics(&y_test, &y_pred, target.n_classes());
    let rows = class_report(&y_test, &y_pred, target.labels());

    println!("Hold-out evaluation ({} rows):", y_test.len());
    println!("{}", format_class_report(&rows, &metrics));

    let bundle = ArtifactBundle {
        encoders,
        scaler,
        classifier,
        target,
    };
    bundle
        .save(&config.artifacts_dir)
        .with_context(|| format!("Failed to persist artifacts to {}", config.artifacts_dir))?;
    println!("Artifacts written to {}", config.artifacts_dir);

    Ok(())
}
