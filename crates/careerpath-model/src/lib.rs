//! careerpath-model — Scoring engine over the two fitted artifacts.
//!
//! Pipeline, per request:
//!   1. `align`      — order engineered columns the way the scaler expects
//!   2. `scaler`     — robust (median / IQR) rescaling
//!   3. `classifier` — class probability vector from the fitted model
//!   4. `ranker`     — top-3 careers as rounded percentages
//!
//! The artifacts themselves are loaded once by `artifacts` and shared
//! read-only behind `Arc`.

pub mod error;
pub mod align;
pub mod scaler;
pub mod classifier;
pub mod logistic;
pub mod forest;
pub mod scorer;
pub mod ranker;
pub mod artifacts;
pub mod predictor;

pub use classifier::{Classifier, ClassifierArtifact};
pub use error::{ModelError, Result};
pub use predictor::CareerPredictor;
pub use scaler::RobustScaler;
pub use scorer::Scorer;
