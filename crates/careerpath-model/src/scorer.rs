//! Rescale-then-classify over an aligned feature vector.

use std::sync::Arc;

use tracing::debug;

use crate::classifier::Classifier;
use crate::error::{Result, ScoringError};
use crate::scaler::RobustScaler;

/// Slack for floating-point noise around the [0, 1] bounds.
const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Holds the two fitted artifacts. Both are optional so an instance can
/// exist before loading finishes; every call re-checks that they are set.
#[derive(Clone, Default)]
pub struct Scorer {
    scaler: Option<Arc<RobustScaler>>,
    classifier: Option<Arc<dyn Classifier>>,
}

impl Scorer {
    pub fn new(scaler: Arc<RobustScaler>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            scaler: Some(scaler),
            classifier: Some(classifier),
        }
    }

    /// A scorer with neither artifact set.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    pub fn with_scaler(mut self, scaler: Arc<RobustScaler>) -> Self {
        self.scaler = Some(scaler);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.scaler.is_some() && self.classifier.is_some()
    }

    pub fn scaler(&self) -> std::result::Result<&RobustScaler, ScoringError> {
        self.scaler.as_deref().ok_or(ScoringError::ScalerNotInitialized)
    }

    pub fn classifier(&self) -> std::result::Result<&dyn Classifier, ScoringError> {
        self.classifier.as_deref().ok_or(ScoringError::ClassifierNotInitialized)
    }

    /// Robust-scale `aligned` and return the classifier's probability vector.
    pub fn score(&self, aligned: &[f64]) -> Result<Vec<f64>> {
        let scaled = self.rescale(aligned)?;
        self.classify(&scaled)
    }

    pub fn rescale(&self, aligned: &[f64]) -> Result<Vec<f64>> {
        let scaled = self.scaler()?.transform(aligned)?;
        debug!("Data scaled successfully. Scaled data shape: (1, {})", scaled.len());
        Ok(scaled)
    }

    pub fn classify(&self, scaled: &[f64]) -> Result<Vec<f64>> {
        let classifier = self.classifier()?;
        let probabilities = classifier
            .predict_proba(scaled)
            .map_err(ScoringError::from)?;

        let expected = classifier.classes().len();
        if probabilities.len() != expected {
            return Err(ScoringError::ProbabilityShape {
                expected,
                actual: probabilities.len(),
            }
            .into());
        }
        if let Some(index) = probabilities.iter().position(|p| !p.is_finite()) {
            return Err(ScoringError::NonFinite { index }.into());
        }
        if let Some((index, &value)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !(-PROBABILITY_TOLERANCE..=1.0 + PROBABILITY_TOLERANCE).contains(*p))
        {
            return Err(ScoringError::OutOfRange { index, value }.into());
        }
        Ok(probabilities)
    }
}
