//! Linear classifier with a softmax (multinomial) or one-vs-rest link.

use serde::{Deserialize, Serialize};

use crate::classifier::{check_width, Classifier};
use crate::error::{ArtifactError, ClassifierError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

/// Fitted logistic regression.
///
/// `coef` has one row per class (or a single row for a binary model,
/// scoring the second class), each `n_features` wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub multi_class: MultiClass,
}

impl LogisticRegression {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(ArtifactError::Invalid(format!(
                "logistic regression needs at least 2 classes, got {}",
                n_classes
            )));
        }
        let binary = n_classes == 2 && self.coef.len() == 1;
        if !binary && self.coef.len() != n_classes {
            return Err(ArtifactError::Invalid(format!(
                "coef has {} rows for {} classes",
                self.coef.len(),
                n_classes
            )));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(ArtifactError::Invalid(format!(
                "intercept has {} entries for {} coef rows",
                self.intercept.len(),
                self.coef.len()
            )));
        }
        let width = self.coef.first().map(Vec::len).unwrap_or(0);
        if width == 0 || self.coef.iter().any(|row| row.len() != width) {
            return Err(ArtifactError::Invalid("coef rows are empty or ragged".to_string()));
        }
        Ok(())
    }

    /// Raw linear scores, one per coef row.
    fn decision_function(&self, x: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        check_width(self.n_features(), features)?;
        let scores = self.decision_function(features);

        if scores.len() == 1 {
            let p = sigmoid(scores[0]);
            return Ok(vec![1.0 - p, p]);
        }

        Ok(match self.multi_class {
            MultiClass::Multinomial => softmax(&scores),
            MultiClass::Ovr => {
                let raw: Vec<f64> = scores.iter().map(|&z| sigmoid(z)).collect();
                let total: f64 = raw.iter().sum();
                raw.iter().map(|p| p / total).collect()
            }
        })
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Numerically stable softmax (shifted by the max score).
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.iter().map(|e| e / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_class() -> LogisticRegression {
        LogisticRegression {
            classes: vec![0, 1, 2],
            coef: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, -1.0]],
            intercept: vec![0.0, 0.0, 0.0],
            multi_class: MultiClass::Multinomial,
        }
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let p = three_class().predict_proba(&[2.0, 0.5]).unwrap();
        assert_eq!(p.len(), 3);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[0] > p[1] && p[1] > p[2]);
    }

    #[test]
    fn test_softmax_stable_for_large_scores() {
        let p = softmax(&[1000.0, 1000.0]);
        assert!((p[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ovr_normalised() {
        let mut model = three_class();
        model.multi_class = MultiClass::Ovr;
        let p = model.predict_proba(&[0.3, -0.2]).unwrap();
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_binary_single_row() {
        let model = LogisticRegression {
            classes: vec![0, 1],
            coef: vec![vec![1.0]],
            intercept: vec![0.0],
            multi_class: MultiClass::Multinomial,
        };
        model.validate().unwrap();
        let p = model.predict_proba(&[0.0]).unwrap();
        assert_eq!(p, vec![0.5, 0.5]);
    }

    #[test]
    fn test_validate_rejects_ragged() {
        let mut model = three_class();
        model.coef[1].push(3.0);
        assert!(model.validate().is_err());
        let mut model = three_class();
        model.intercept.pop();
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_width_checked() {
        assert!(three_class().predict_proba(&[1.0]).is_err());
    }
}
