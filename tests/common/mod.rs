//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Two-tree forest over `wind_kw` and `battery_soc`.
///
/// Tree 1: `wind_kw <= 50` → 100, else 300.
/// Tree 2: `battery_soc <= 0.5` → 200, else 400.
pub const FOREST_MODEL_JSON: &str = r#"{
    "kind": "forest",
    "trees": [
        {"nodes": [
            {"type": "split", "feature": 1, "threshold": 50.0, "left": 1, "right": 2},
            {"type": "leaf", "value": 100.0},
            {"type": "leaf", "value": 300.0}
        ]},
        {"nodes": [
            {"type": "split", "feature": 3, "threshold": 0.5, "left": 1, "right": 2},
            {"type": "leaf", "value": 200.0},
            {"type": "leaf", "value": 400.0}
        ]}
    ]
}"#;

/// Linear model reproducing the training target `solar + wind + hydro`.
pub const SUM_MODEL_JSON: &str =
    r#"{"kind": "linear", "intercept": 0.0, "coefficients": [1.0, 1.0, 1.0, 0.0]}"#;

/// Writes `json` as `model.json` under `dir` and returns its path.
pub fn write_model(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("model.json");
    fs::write(&path, json).expect("model file should be writable");
    path
}
