use std::path::{Path, PathBuf};

use careerpath_common::StudentRecord;
use serde_json::{json, Value};

/// Columns the fixture scaler is fitted on: everything the engineer emits
/// except the three demographic flags.
pub const SCALER_COLUMNS: [&str; 17] = [
    "math_score",
    "history_score",
    "physics_score",
    "chemistry_score",
    "biology_score",
    "english_score",
    "geography_score",
    "weekly_self_study_hours",
    "total_score",
    "avg_score",
    "stem_score",
    "humanities_score",
    "score_std",
    "stem_to_humanities_ratio",
    "max_score",
    "min_score",
    "score_range",
];

pub const N_CLASSES: usize = 16;

/// The worked example: total 525, avg 75, stem 82.5, humanities 65, range 30.
pub fn sample_student() -> StudentRecord {
    StudentRecord {
        gender: 1,
        part_time_job: 0,
        extracurricular_activities: 1,
        math_score: 90.0,
        history_score: 60.0,
        physics_score: 85.0,
        chemistry_score: 80.0,
        biology_score: 75.0,
        english_score: 65.0,
        geography_score: 70.0,
        weekly_study_hours: 20.0,
    }
}

/// [`sample_student`] as a request body.
pub fn sample_student_json() -> Value {
    json!({
        "gender": 1,
        "part_time_job": 0,
        "extracurricular_activities": 1,
        "math_score": 90,
        "history_score": 60,
        "physics_score": 85,
        "chemistry_score": 80,
        "biology_score": 75,
        "english_score": 65,
        "geography_score": 70,
        "weekly_study_hours": 20
    })
}

/// Scaler over [`SCALER_COLUMNS`] with median 0 and IQR 1 everywhere.
pub fn identity_scaler_json() -> String {
    json!({
        "feature_names_in": SCALER_COLUMNS,
        "center": vec![0.0; SCALER_COLUMNS.len()],
        "scale": vec![1.0; SCALER_COLUMNS.len()],
    })
    .to_string()
}

/// 16-class multinomial logistic model over [`SCALER_COLUMNS`] with small,
/// fixed, class-dependent weights.
pub fn logistic_model_json() -> String {
    let n_features = SCALER_COLUMNS.len();
    let coef: Vec<Vec<f64>> = (0..N_CLASSES)
        .map(|c| {
            (0..n_features)
                .map(|j| (((c * 7 + j * 3) % 11) as f64 - 5.0) * 0.001)
                .collect()
        })
        .collect();
    let intercept: Vec<f64> = (0..N_CLASSES).map(|c| c as f64 * 0.01).collect();
    json!({
        "kind": "logistic_regression",
        "classes": (0..N_CLASSES as i64).collect::<Vec<_>>(),
        "coef": coef,
        "intercept": intercept,
        "multi_class": "multinomial",
    })
    .to_string()
}

/// Write both artifacts into `dir`; returns `(model_path, scaler_path)`.
pub fn write_artifacts(dir: &Path, model_json: &str, scaler_json: &str) -> (PathBuf, PathBuf) {
    let model = dir.join("career_predictor.json");
    let scaler = dir.join("scaler.json");
    std::fs::write(&model, model_json).expect("write model artifact");
    std::fs::write(&scaler, scaler_json).expect("write scaler artifact");
    (model, scaler)
}
