//! End-to-end test: train an artifact bundle on a synthetic survey and
//! serve a prediction from it through the compiled binary.

use std::fmt::Write as _;
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const CLASSES: [&str; 7] = [
    "Insufficient_Weight",
    "Normal_Weight",
    "Obesity_Type_I",
    "Obesity_Type_II",
    "Obesity_Type_III",
    "Overweight_Level_I",
    "Overweight_Level_II",
];

/// A weight-separated survey with every categorical token the prediction
/// form defaults to present in the training vocabulary.
fn synthetic_csv() -> String {
    let mut csv = String::from(
        "Gender,Age,Height,Weight,family_history,FAVC,FCVC,NCP,CAEC,SMOKE,CH2O,SCC,FAF,TUE,CALC,MTRANS,Obesity\n",
    );
    let frequencies = ["no", "Sometimes", "Frequently", "Always"];
    let transport = [
        "Public_Transportation",
        "Automobile",
        "Walking",
        "Bike",
        "Motorbike",
    ];
    for (class_idx, class) in CLASSES.iter().enumerate() {
        for row in 0..8usize {
            let weight = 45.0 + 18.0 * class_idx as f32 + 0.5 * row as f32;
            let gender = if row % 2 == 0 { "Female" } else { "Male" };
            let yes_no = if row % 2 == 0 { "yes" } else { "no" };
            writeln!(
                csv,
                "{gender},{age},{height:.2},{weight:.1},{yes_no},{yes_no},2,3,{caec},{yes_no},2,{yes_no},1,1,{calc},{mtrans},{class}",
                age = 20 + row,
                height = 1.60 + 0.02 * row as f32,
                caec = frequencies[row % 4],
                calc = frequencies[(row + 1) % 4],
                mtrans = transport[row % 5],
            )
            .unwrap();
        }
    }
    csv
}

#[test]
fn train_then_predict_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("survey.csv");
    fs::write(&data_path, synthetic_csv()).unwrap();

    let artifacts_dir = dir.path().join("artifacts");
    let config_path = dir.path().join("train.json");
    let config = format!(
        r#"{{
            "data": {data:?},
            "artifacts_dir": {artifacts:?},
            "test_fraction": 0.2,
            "seed": 42,
            "model": {{ "learning_rate": 0.3, "Gbdt": {{ "max_depth": 3, "num_boost_round": 5 }} }}
        }}"#,
        data = data_path.to_str().unwrap(),
        artifacts = artifacts_dir.to_str().unwrap(),
    );
    fs::write(&config_path, config).unwrap();

    Command::cargo_bin("obesity")
        .unwrap()
        .arg("train")
        .arg(&config_path)
        .assert()
        .success();

    for file in [
        "manifest.json",
        "encoders.json",
        "scaler.json",
        "model.json",
        "target_encoder.json",
    ] {
        assert!(artifacts_dir.join(file).exists(), "missing artifact {}", file);
    }

    Command::cargo_bin("obesity")
        .unwrap()
        .args([
            "predict",
            "--artifacts",
            artifacts_dir.to_str().unwrap(),
            "--weight",
            "140",
            "--height",
            "1.62",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Predicted obesity level:"));
}

#[test]
fn predict_rejects_unknown_category_after_training() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("survey.csv");
    fs::write(&data_path, synthetic_csv()).unwrap();

    let artifacts_dir = dir.path().join("artifacts");
    let config_path = dir.path().join("train.json");
    let config = format!(
        r#"{{
            "data": {data:?},
            "artifacts_dir": {artifacts:?},
            "model": {{ "learning_rate": 0.3, "Gbdt": {{ "max_depth": 3, "num_boost_round": 5 }} }}
        }}"#,
        data = data_path.to_str().unwrap(),
        artifacts = artifacts_dir.to_str().unwrap(),
    );
    fs::write(&config_path, config).unwrap();

    Command::cargo_bin("obesity")
        .unwrap()
        .arg("train")
        .arg(&config_path)
        .assert()
        .success();

    Command::cargo_bin("obesity")
        .unwrap()
        .args([
            "predict",
            "--artifacts",
            artifacts_dir.to_str().unwrap(),
            "--mtrans",
            "Teleport",
        ])
        .assert()
        .failure();
}
