//! Request, feature, and response records.

use serde::{Deserialize, Serialize};

use crate::error::{CareerError, Result};
use crate::lenient;

/// Number of subject scores on a student record.
pub const SUBJECT_COUNT: usize = 7;

/// Inclusive bounds a subject score is expected to fall in.
pub const SCORE_RANGE: (f64, f64) = (0.0, 100.0);

// ── Input ────────────────────────────────────────────────────────────────────

/// A student's demographic flags and subject scores, as posted to `/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Categorical code (the web form sends 1 = male, 0 = female)
    #[serde(deserialize_with = "lenient::integer")]
    pub gender: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub part_time_job: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub extracurricular_activities: i64,
    #[serde(deserialize_with = "lenient::float")]
    pub math_score: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub history_score: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub physics_score: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub chemistry_score: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub biology_score: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub english_score: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub geography_score: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub weekly_study_hours: f64,
}

impl StudentRecord {
    /// Subject scores in column order:
    /// math, history, physics, chemistry, biology, english, geography.
    pub fn subject_scores(&self) -> [f64; SUBJECT_COUNT] {
        [
            self.math_score,
            self.history_score,
            self.physics_score,
            self.chemistry_score,
            self.biology_score,
            self.english_score,
            self.geography_score,
        ]
    }

    /// Named subject scores, same order as [`Self::subject_scores`].
    pub fn named_subject_scores(&self) -> [(&'static str, f64); SUBJECT_COUNT] {
        [
            ("math_score", self.math_score),
            ("history_score", self.history_score),
            ("physics_score", self.physics_score),
            ("chemistry_score", self.chemistry_score),
            ("biology_score", self.biology_score),
            ("english_score", self.english_score),
            ("geography_score", self.geography_score),
        ]
    }

    /// Every field that lies outside its expected range.
    /// Scores must be within [`SCORE_RANGE`]; study hours must be non-negative.
    pub fn out_of_range(&self) -> Vec<(&'static str, f64)> {
        let (lo, hi) = SCORE_RANGE;
        let mut fields: Vec<(&'static str, f64)> = self
            .named_subject_scores()
            .into_iter()
            .filter(|(_, v)| *v < lo || *v > hi)
            .collect();
        if self.weekly_study_hours < 0.0 {
            fields.push(("weekly_study_hours", self.weekly_study_hours));
        }
        fields
    }

    /// Strict range check. Fails on the first out-of-range field.
    pub fn check_ranges(&self) -> Result<()> {
        match self.out_of_range().first() {
            None => Ok(()),
            Some(&("weekly_study_hours", value)) => Err(CareerError::OutOfRange {
                field: "weekly_study_hours",
                value,
                expected: ">= 0",
            }),
            Some(&(field, value)) => Err(CareerError::OutOfRange {
                field,
                value,
                expected: "0..=100",
            }),
        }
    }
}

// ── Engineered features ──────────────────────────────────────────────────────

/// Column names of a [`FeatureRecord`] in natural order.
/// These are the names the fitted scaler knows the columns by.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "gender",
    "part_time_job",
    "extracurricular_activities",
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

pub const FEATURE_COUNT: usize = 20;

/// Fixed-shape numeric record produced by feature engineering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub gender: f64,
    pub part_time_job: f64,
    pub extracurricular_activities: f64,
    pub math_score: f64,
    pub history_score: f64,
    pub physics_score: f64,
    pub chemistry_score: f64,
    pub biology_score: f64,
    pub english_score: f64,
    pub geography_score: f64,
    /// Renamed from `weekly_study_hours` on the way in
    pub weekly_self_study_hours: f64,
    pub total_score: f64,
    pub avg_score: f64,
    pub stem_score: f64,
    pub humanities_score: f64,
    /// Sample standard deviation (N−1) of the seven subject scores
    pub score_std: f64,
    pub stem_to_humanities_ratio: f64,
    pub max_score: f64,
    pub min_score: f64,
    pub score_range: f64,
}

impl FeatureRecord {
    /// Values in [`FEATURE_COLUMNS`] order.
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.gender,
            self.part_time_job,
            self.extracurricular_activities,
            self.math_score,
            self.history_score,
            self.physics_score,
            self.chemistry_score,
            self.biology_score,
            self.english_score,
            self.geography_score,
            self.weekly_self_study_hours,
            self.total_score,
            self.avg_score,
            self.stem_score,
            self.humanities_score,
            self.score_std,
            self.stem_to_humanities_ratio,
            self.max_score,
            self.min_score,
            self.score_range,
        ]
    }

    /// `(name, value)` pairs in natural column order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_COLUMNS.into_iter().zip(self.as_array())
    }

    /// Look a column up by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}

// ── Output ───────────────────────────────────────────────────────────────────

/// One ranked career with its probability as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub career: String,
    /// Percentage in [0, 100], rounded to 2 decimals
    pub probability: f64,
}

/// Response body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predictions: Vec<Prediction>,
}
