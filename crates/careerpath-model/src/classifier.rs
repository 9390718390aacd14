//! Trait for the fitted probabilistic classifier.
//!
//! The scorer treats the model as an oracle: a scaled feature vector goes
//! in, one probability per class comes out. Concrete model families live in
//! their own modules and are selected by the artifact's `kind` tag.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ClassifierError};
use crate::forest::RandomForest;
use crate::logistic::LogisticRegression;

/// A fitted multi-class probabilistic classifier.
///
/// Implementations can use:
/// - a linear model with softmax/OvR link (`LogisticRegression`)
/// - a tree ensemble averaging leaf distributions (`RandomForest`)
/// - fixed probabilities (tests)
pub trait Classifier: Send + Sync {
    /// Class IDs in the order probabilities are reported.
    fn classes(&self) -> &[i64];

    /// Width of the input vector the model was fitted on.
    fn n_features(&self) -> usize;

    /// One probability per entry of [`Self::classes`], summing to ≈1.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError>;
}

/// On-disk classifier artifact, tagged by model family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl ClassifierArtifact {
    /// Validate shapes and hand back a shareable classifier.
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>, ArtifactError> {
        match self {
            ClassifierArtifact::LogisticRegression(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
            ClassifierArtifact::RandomForest(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            }
        }
    }
}

pub(crate) fn check_width(expected: usize, features: &[f64]) -> Result<(), ClassifierError> {
    if features.len() == expected {
        Ok(())
    } else {
        Err(ClassifierError::DimensionMismatch {
            expected,
            actual: features.len(),
        })
    }
}

// ── Fixed-output classifier for testing ──────────────────────────────────────

/// Classifier that ignores its input and returns stored probabilities.
pub struct FixedClassifier {
    classes: Vec<i64>,
    probabilities: Vec<f64>,
    n_features: usize,
}

impl FixedClassifier {
    pub fn new(classes: Vec<i64>, probabilities: Vec<f64>, n_features: usize) -> Self {
        Self { classes, probabilities, n_features }
    }
}

impl Classifier for FixedClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        check_width(self.n_features, features)?;
        Ok(self.probabilities.clone())
    }
}
