//! Align → scale → classify → rank, over one engineered record.

use careerpath_common::{FeatureRecord, PredictionResult};
use tracing::{debug, info};

use crate::align::align;
use crate::error::Result;
use crate::ranker::{rank, TOP_K};
use crate::scorer::Scorer;

#[derive(Clone)]
pub struct CareerPredictor {
    scorer: Scorer,
    top_k: usize,
}

impl CareerPredictor {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer, top_k: TOP_K }
    }

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    pub fn predict(&self, features: &FeatureRecord) -> Result<PredictionResult> {
        let scaler = self.scorer.scaler()?;
        if let Some(names) = scaler.feature_names() {
            debug!("Scaler features: {:?}", names);
        }

        let aligned = align(features, scaler.feature_names(), scaler.n_features())?;
        let probabilities = self.scorer.score(&aligned)?;
        let classes = self.scorer.classifier()?.classes();
        let predictions = rank(&probabilities, classes, self.top_k)?;

        info!("Top {} predictions: {:?}", self.top_k, predictions);
        Ok(PredictionResult { predictions })
    }
}
