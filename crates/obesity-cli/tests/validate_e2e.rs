//! End-to-end test: cross-validate the Random Forest baseline on a
//! synthetic survey through the compiled binary.

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
fn validate_prints_mean_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("survey.csv");
    fs::write(&data_path, synthetic_csv()).unwrap();

    let config_path = dir.path().join("validate.json");
    let config = format!(
        r#"{{
            "data": {data:?},
            "folds": 5,
            "seed": 42,
            "model": {{
                "learning_rate": 0.1,
                "RandomForest": {{ "n_trees": 20, "max_depth": 6, "seed": 42 }}
            }}
        }}"#,
        data = data_path.to_str().unwrap(),
    );
    fs::write(&config_path, config).unwrap();

    Command::cargo_bin("obesity")
        .unwrap()
        .arg("validate")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cross-validation results (5-fold):"))
        .stdout(predicate::str::contains("Mean accuracy:"))
        .stdout(predicate::str::contains("Mean precision (macro):"))
        .stdout(predicate::str::contains("Mean recall (macro):"))
        .stdout(predicate::str::contains("Mean F1-score (macro):"));
}

#[test]
fn validate_with_more_folds_than_rows_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("survey.csv");
    fs::write(&data_path, synthetic_csv()).unwrap();

    let config_path = dir.path().join("validate.json");
    let config = format!(
        r#"{{ "data": {data:?}, "folds": 500 }}"#,
        data = data_path.to_str().unwrap(),
    );
    fs::write(&config_path, config).unwrap();

    Command::cargo_bin("obesity")
        .unwrap()
        .arg("validate")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("folds"));
}
