//! Feature alignment against the scaler's fitted column list.

use careerpath_common::FeatureRecord;
use tracing::{debug, warn};

use crate::error::AlignError;

/// Produce the feature vector in the order the scaler was fitted on.
///
/// * Every expected name must exist on the record; all absent names are
///   reported together.
/// * Record columns the scaler does not know are logged and dropped.
/// * With no expected list the record's natural order is used, but only if
///   the scaler's width (`n_features`) matches, since nothing else can be
///   checked.
pub fn align(
    record: &FeatureRecord,
    expected: Option<&[String]>,
    n_features: usize,
) -> Result<Vec<f64>, AlignError> {
    let Some(expected) = expected else {
        let values = record.as_array().to_vec();
        warn!(
            "Scaler exposes no feature names; passing {} columns through in natural order",
            values.len()
        );
        if values.len() != n_features {
            return Err(AlignError::FeatureCountMismatch {
                expected: n_features,
                actual: values.len(),
            });
        }
        return Ok(values);
    };

    let missing: Vec<String> = expected
        .iter()
        .filter(|name| record.get(name).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(AlignError::SchemaMismatch { missing });
    }

    let extra: Vec<&str> = record
        .columns()
        .map(|(name, _)| name)
        .filter(|name| !expected.iter().any(|e| e == name))
        .collect();
    if !extra.is_empty() {
        warn!("Extra features found (will be ignored): {:?}", extra);
    }

    let aligned: Vec<f64> = expected
        .iter()
        .filter_map(|name| record.get(name))
        .collect();
    debug!("Reordered features: {:?}", expected);
    Ok(aligned)
}
