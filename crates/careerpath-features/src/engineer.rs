//! Student record → feature record.
//!
//! Pure and total: the same input always produces the same record,
//! bit-for-bit. The derived columns are the ones the scaler and classifier
//! were fitted on, so the formulas here must not drift.

use careerpath_common::{FeatureRecord, StudentRecord};
use tracing::debug;

use crate::stats::{max, mean, min, sample_std, sum};

/// Added to the humanities mean before dividing, so an all-zero humanities
/// block yields `stem / 1e-6` instead of infinity.
pub const RATIO_EPSILON: f64 = 1e-6;

/// Derive the full feature record from a validated student record.
pub fn engineer(student: &StudentRecord) -> FeatureRecord {
    let scores = student.subject_scores();
    let stem = [
        student.math_score,
        student.physics_score,
        student.chemistry_score,
        student.biology_score,
    ];
    let humanities = [
        student.history_score,
        student.english_score,
        student.geography_score,
    ];

    let total_score = sum(&scores);
    let stem_score = mean(&stem);
    let humanities_score = mean(&humanities);
    let max_score = max(&scores);
    let min_score = min(&scores);

    let record = FeatureRecord {
        gender: student.gender as f64,
        part_time_job: student.part_time_job as f64,
        extracurricular_activities: student.extracurricular_activities as f64,
        math_score: student.math_score,
        history_score: student.history_score,
        physics_score: student.physics_score,
        chemistry_score: student.chemistry_score,
        biology_score: student.biology_score,
        english_score: student.english_score,
        geography_score: student.geography_score,
        weekly_self_study_hours: student.weekly_study_hours,
        total_score,
        avg_score: total_score / scores.len() as f64,
        stem_score,
        humanities_score,
        score_std: sample_std(&scores),
        stem_to_humanities_ratio: stem_score / (humanities_score + RATIO_EPSILON),
        max_score,
        min_score,
        score_range: max_score - min_score,
    };

    debug!(?record, "Engineered features");
    record
}
