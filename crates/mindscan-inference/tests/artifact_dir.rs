// SPDX-License-Identifier: Apache-2.0

use mindscan_inference::{sha256_hex, InferenceAdapter, EXPECTED_COLUMNS_FILE};
use mindscan_model::{question_keys, QuizSubmission};
use serde_json::json;
use std::fs;
use std::path::Path;

/// Linear model over 40 features that scores class `i` by the answer in
/// column `i`, so the predicted class reveals which column held the maximum.
fn column_echo_model(n_classes: usize) -> serde_json::Value {
    let coefficients: Vec<Vec<f64>> = (0..n_classes)
        .map(|class| {
            let mut row = vec![0.0; 40];
            row[class] = 1.0;
            row
        })
        .collect();
    json!({
        "kind": "linear",
        "n_features": 40,
        "classes": (0..n_classes as i64).collect::<Vec<_>>(),
        "coefficients": coefficients,
        "intercepts": vec![0.0; n_classes],
    })
}

fn forest_stump(class_left: usize, class_right: usize, n_classes: usize) -> serde_json::Value {
    let leaf = |class: usize| {
        let mut weights = vec![0.0; n_classes];
        weights[class] = 5.0;
        weights
    };
    json!({
        "kind": "forest",
        "n_features": 40,
        "classes": (0..n_classes as i64).collect::<Vec<_>>(),
        "trees": [{
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [0, -2, -2],
            "threshold": [2.5, -2.0, -2.0],
            "value": [vec![1.0; n_classes], leaf(class_left), leaf(class_right)]
        }]
    })
}

fn write_json(dir: &Path, file: &str, value: &serde_json::Value) {
    fs::write(dir.join(file), serde_json::to_vec(value).expect("encode json")).expect("write json");
}

fn seed_dir(dir: &Path, columns: &[String]) {
    write_json(dir, EXPECTED_COLUMNS_FILE, &json!(columns));
    write_json(dir, "dep_model.json", &column_echo_model(5));
    write_json(dir, "sat_model.json", &forest_stump(1, 4, 5));
    write_json(dir, "big_model.json", &column_echo_model(3));
}

#[test]
fn load_dir_reads_all_artifacts_and_applies_column_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut columns = question_keys();
    // Model column 1 is q40, so the model sees q40's answer in slot 1.
    columns.swap(1, 39);
    seed_dir(tmp.path(), &columns);

    let adapter = InferenceAdapter::load_dir(tmp.path()).expect("load artifacts");
    assert_eq!(adapter.columns().names(), columns.as_slice());
    assert_eq!(adapter.digests().len(), 4);
    let columns_bytes = fs::read(tmp.path().join(EXPECTED_COLUMNS_FILE)).expect("read columns");
    assert_eq!(adapter.digests()[0].file, EXPECTED_COLUMNS_FILE);
    assert_eq!(adapter.digests()[0].sha256, sha256_hex(&columns_bytes));

    let mut answers = vec![0; 40];
    answers[39] = 9;
    let prediction = adapter
        .infer(&QuizSubmission::new(answers).expect("submission"))
        .expect("prediction");
    assert_eq!(prediction.depression, 1);
    assert_eq!(prediction.personality, 1);
    assert_eq!(prediction.satisfaction, 1);

    let prediction = adapter
        .infer(&QuizSubmission::new(vec![3; 40]).expect("submission"))
        .expect("prediction");
    assert_eq!(prediction.satisfaction, 4);
}

#[test]
fn load_dir_reports_missing_artifact_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    seed_dir(tmp.path(), &question_keys());
    fs::remove_file(tmp.path().join("big_model.json")).expect("remove model");
    let err = InferenceAdapter::load_dir(tmp.path()).expect_err("missing model");
    assert!(err.path.ends_with("big_model.json"));
    assert!(err.message.contains("read failed"));
}

#[test]
fn load_dir_rejects_malformed_artifacts() {
    let tmp = tempfile::tempdir().expect("tempdir");
    seed_dir(tmp.path(), &question_keys());
    write_json(
        tmp.path(),
        "dep_model.json",
        &json!({"kind": "linear", "n_features": 40, "classes": [0, 1, 2], "coefficients": [], "intercepts": []}),
    );
    let err = InferenceAdapter::load_dir(tmp.path()).expect_err("bad model");
    assert!(err.to_string().contains("dep_model.json"));
    assert!(err.message.contains("coefficient rows"));
}

#[test]
fn load_dir_rejects_width_mismatch_and_bad_columns() {
    let tmp = tempfile::tempdir().expect("tempdir");
    seed_dir(tmp.path(), &question_keys());
    let mut narrow = column_echo_model(3);
    narrow["n_features"] = json!(3);
    narrow["coefficients"] = json!([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    write_json(tmp.path(), "big_model.json", &narrow);
    let err = InferenceAdapter::load_dir(tmp.path()).expect_err("width mismatch");
    assert!(err.message.contains("personality model expects 3 features"));

    let mut dup = question_keys();
    dup[0] = "q2".to_string();
    write_json(tmp.path(), EXPECTED_COLUMNS_FILE, &json!(dup));
    let err = InferenceAdapter::load_dir(tmp.path()).expect_err("duplicate column");
    assert!(err.message.contains("duplicate expected column"));
}
