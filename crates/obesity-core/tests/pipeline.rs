//! End-to-end tests for the request pipeline over a bundle fitted on
//! synthetic survey data: determinism, vector layout, boundary values,
//! unknown categories, and artifact round-trips.

use std::collections::BTreeMap;

use obesity_core::artifacts::ArtifactBundle;
use obesity_core::config::{ModelConfig, ModelType};
use obesity_core::encoding::{CategoricalEncoder, TargetDecoder};
use obesity_core::error::PipelineError;
use obesity_core::io::Dataset;
use obesity_core::math::Array2;
use obesity_core::models::gbdt::MulticlassGbdt;
use obesity_core::models::ClassifierModel;
use obesity_core::pipeline::{Pipeline, FEATURE_COUNT};
use obesity_core::preprocessing::Scaler;
use obesity_core::schema::{
    categorical_domain, InputRecord, CATEGORICAL_FIELDS, CLASS_LABELS,
};

/// Synthetic survey data: weight decides the class, everything else cycles
/// through its vocabulary so every token is seen during fitting.
fn synthetic_dataset() -> Dataset {
    let rows_per_class = 8;
    let n = CLASS_LABELS.len() * rows_per_class;

    let mut categorical: Vec<Vec<String>> = vec![Vec::new(); CATEGORICAL_FIELDS.len()];
    let mut numeric = Vec::with_capacity(n * 8);
    let mut target = Vec::with_capacity(n);

    for (class, label) in CLASS_LABELS.iter().enumerate() {
        for i in 0..rows_per_class {
            for (col, field) in CATEGORICAL_FIELDS.iter().enumerate() {
                let domain = categorical_domain(field);
                categorical[col].push(domain[(class + i) % domain.len()].to_string());
            }
            let jitter = i as f32 * 0.3;
            let weight = 40.0 + 35.0 * class as f32 + jitter;
            // Age, Height, Weight, FCVC, NCP, CH2O, FAF, TUE
            numeric.extend_from_slice(&[
                25.0 + jitter,
                1.6 + 0.01 * i as f32,
                weight,
                2.0,
                3.0,
                2.0,
                1.0,
                1.0,
            ]);
            target.push(label.to_string());
        }
    }

    Dataset {
        categorical,
        numeric: Array2::from_shape_vec((n, 8), numeric).unwrap(),
        target,
    }
}

fn fitted_bundle() -> ArtifactBundle {
    let dataset = synthetic_dataset();

    let mut encoders = BTreeMap::new();
    for field in CATEGORICAL_FIELDS {
        let tokens = dataset
            .categorical_column(field)
            .iter()
            .map(|s| s.as_str());
        encoders.insert(field.to_string(), CategoricalEncoder::fit(tokens));
    }
    let target = TargetDecoder::fit(dataset.target.iter().map(|s| s.as_str()));
    let scaler = Scaler::fit(&dataset.numeric);

    let x = dataset.encode(&encoders, &scaler).unwrap();
    let y: Vec<usize> = dataset
        .target
        .iter()
        .map(|label| target.encode(label).unwrap())
        .collect();

    let mut classifier = MulticlassGbdt::new(ModelConfig::new(
        0.3,
        ModelType::Gbdt {
            max_depth: 3,
            num_boost_round: 5,
        },
    ));
    classifier.fit(&x, &y).unwrap();

    ArtifactBundle {
        encoders,
        scaler,
        classifier,
        target,
    }
}

fn scenario_a_record() -> InputRecord {
    InputRecord {
        gender: "Female".into(),
        age: 25.0,
        height: 1.70,
        weight: 70.0,
        family_history: "yes".into(),
        favc: "yes".into(),
        fcvc: 2.0,
        ncp: 3.0,
        caec: "Sometimes".into(),
        smoke: "no".into(),
        ch2o: 2.0,
        scc: "no".into(),
        faf: 1.0,
        tue: 1.0,
        calc: "no".into(),
        mtrans: "Public_Transportation".into(),
    }
}

#[test]
fn scenario_a_yields_a_known_label_and_explanation() {
    let pipeline = Pipeline::new(fitted_bundle());
    let prediction = pipeline.run(&scenario_a_record()).unwrap();

    assert!(CLASS_LABELS.contains(&prediction.label.as_str()));
    assert!(!prediction.explanation.is_empty());
    assert_ne!(prediction.explanation, "Class not recognized.");
}

#[test]
fn pipeline_is_deterministic() {
    let pipeline = Pipeline::new(fitted_bundle());
    let record = scenario_a_record();
    let first = pipeline.run(&record).unwrap();
    let second = pipeline.run(&record).unwrap();
    assert_eq!(first, second);
}

#[test]
fn localized_input_predicts_like_canonical_input() {
    let pipeline = Pipeline::new(fitted_bundle());

    let mut localized = scenario_a_record();
    localized.gender = "Feminino".into();
    localized.family_history = "Sim".into();
    localized.caec = "Às vezes".into();
    localized.smoke = "Não".into();
    localized.mtrans = "Transporte público".into();

    let canonical = pipeline.run(&scenario_a_record()).unwrap();
    let translated = pipeline.run(&localized).unwrap();
    assert_eq!(canonical, translated);
}

#[test]
fn unknown_category_is_rejected_not_defaulted() {
    let pipeline = Pipeline::new(fitted_bundle());
    let mut record = scenario_a_record();
    record.mtrans = "Teleport".into();

    match pipeline.run(&record) {
        Err(PipelineError::Validation { field, .. }) => assert_eq!(field, "MTRANS"),
        other => panic!("expected a validation error, got {:?}", other.map(|p| p.label)),
    }
}

#[test]
fn out_of_domain_numeric_is_rejected() {
    let pipeline = Pipeline::new(fitted_bundle());
    let mut record = scenario_a_record();
    record.age = 5.0;

    match pipeline.run(&record) {
        Err(PipelineError::Validation { field, .. }) => assert_eq!(field, "Age"),
        other => panic!("expected a validation error, got {:?}", other.map(|p| p.label)),
    }
}

#[test]
fn boundary_values_encode_and_predict() {
    let pipeline = Pipeline::new(fitted_bundle());

    for (age, height) in [(10.0, 1.0), (100.0, 2.5), (10.0, 2.5), (100.0, 1.0)] {
        let mut record = scenario_a_record();
        record.age = age;
        record.height = height;
        let prediction = pipeline.run(&record).unwrap();
        assert!(CLASS_LABELS.contains(&prediction.label.as_str()));
    }
}

#[test]
fn encoded_vector_has_fixed_layout() {
    let pipeline = Pipeline::new(fitted_bundle());
    let base = pipeline.encode(&scenario_a_record()).unwrap();
    assert_eq!(base.len(), FEATURE_COUNT);

    // MTRANS is the last field: changing it must only move slot 15.
    let mut record = scenario_a_record();
    record.mtrans = "Walking".into();
    let moved = pipeline.encode(&record).unwrap();
    for (i, (a, b)) in base.iter().zip(moved.iter()).enumerate() {
        if i == 15 {
            assert_ne!(a, b, "slot 15 should hold the MTRANS code");
        } else {
            assert_eq!(a, b, "slot {} should be untouched", i);
        }
    }

    // Age is the second field: changing it must only move slot 1.
    let mut record = scenario_a_record();
    record.age = 40.0;
    let moved = pipeline.encode(&record).unwrap();
    for (i, (a, b)) in base.iter().zip(moved.iter()).enumerate() {
        if i == 1 {
            assert_ne!(a, b, "slot 1 should hold the scaled age");
        } else {
            assert_eq!(a, b, "slot {} should be untouched", i);
        }
    }
}

#[test]
fn artifact_round_trip_is_idempotent() {
    let bundle = fitted_bundle();
    let dir = tempfile::tempdir().unwrap();
    bundle.save(dir.path()).unwrap();

    let in_memory = Pipeline::new(bundle);
    let first_load = Pipeline::load(dir.path()).unwrap();
    let second_load = Pipeline::load(dir.path()).unwrap();

    let record = scenario_a_record();
    let expected = in_memory.run(&record).unwrap();
    assert_eq!(first_load.run(&record).unwrap(), expected);
    assert_eq!(second_load.run(&record).unwrap(), expected);
}

#[test]
fn missing_artifacts_are_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    match Pipeline::load(dir.path().join("nope")) {
        Err(PipelineError::ArtifactLoad(_)) => {}
        other => panic!("expected ArtifactLoad, got {:?}", other.err()),
    }
}

#[test]
fn corrupt_artifact_is_a_load_error() {
    let bundle = fitted_bundle();
    let dir = tempfile::tempdir().unwrap();
    bundle.save(dir.path()).unwrap();
    std::fs::write(dir.path().join("scaler.json"), "not json").unwrap();

    match Pipeline::load(dir.path()) {
        Err(PipelineError::ArtifactLoad(_)) => {}
        other => panic!("expected ArtifactLoad, got {:?}", other.err()),
    }
}
