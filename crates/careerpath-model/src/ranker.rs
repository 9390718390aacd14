//! Top-k selection over a class probability vector.

use careerpath_common::career_map::career_label;
use careerpath_common::Prediction;
use tracing::warn;

use crate::error::RankError;

/// Number of careers returned per request.
pub const TOP_K: usize = 3;

/// Indices of the `k` largest probabilities, highest first.
/// The sort is stable, so ties keep the lower index first.
pub fn top_indices(probabilities: &[f64], k: usize) -> Vec<usize> {
    let mut indexed: Vec<usize> = (0..probabilities.len()).collect();
    indexed.sort_by(|&a, &b| {
        probabilities[b]
            .partial_cmp(&probabilities[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indexed.truncate(k);
    indexed
}

/// Probability → percentage rounded to 2 decimals.
pub fn to_percentage(p: f64) -> f64 {
    (p * 100.0 * 100.0).round() / 100.0
}

/// Rank the top `k` classes and attach career labels.
///
/// `classes[i]` is the class ID for `probabilities[i]`. IDs without a
/// label are skipped; if nothing survives, `EmptyPrediction` is returned.
pub fn rank(probabilities: &[f64], classes: &[i64], k: usize) -> Result<Vec<Prediction>, RankError> {
    if probabilities.len() != classes.len() {
        return Err(RankError::LengthMismatch {
            probabilities: probabilities.len(),
            classes: classes.len(),
        });
    }

    let predictions: Vec<Prediction> = top_indices(probabilities, k)
        .into_iter()
        .filter_map(|i| {
            let class_id = classes[i];
            match career_label(class_id) {
                Some(career) => Some(Prediction {
                    career: career.to_string(),
                    probability: to_percentage(probabilities[i]),
                }),
                None => {
                    warn!("Class {} has no career label; skipping", class_id);
                    None
                }
            }
        })
        .collect();

    if predictions.is_empty() {
        return Err(RankError::EmptyPrediction);
    }
    Ok(predictions)
}
