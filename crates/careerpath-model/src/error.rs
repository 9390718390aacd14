//! Error types for each scoring stage.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug, PartialEq)]
pub enum AlignError {
    #[error("Missing features for scaling: {missing:?}")]
    SchemaMismatch { missing: Vec<String> },

    #[error("Scaler expects {expected} features but the record has {actual} and no feature names to align by")]
    FeatureCountMismatch { expected: usize, actual: usize },
}

#[derive(Error, Debug, PartialEq)]
pub enum ScalingError {
    #[error("Scaler expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Input contains a non-finite value for feature {feature}")]
    NonFinite { feature: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum ClassifierError {
    #[error("Classifier expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Tree {tree} did not reach a usable leaf")]
    MalformedTree { tree: usize },
}

#[derive(Error, Debug, PartialEq)]
pub enum ScoringError {
    #[error("Scaler not initialized")]
    ScalerNotInitialized,

    #[error("Model not initialized")]
    ClassifierNotInitialized,

    #[error("Classifier returned {actual} probabilities for {expected} classes")]
    ProbabilityShape { expected: usize, actual: usize },

    #[error("Classifier returned a non-finite probability at index {index}")]
    NonFinite { index: usize },

    #[error("Classifier returned probability {value} at index {index}, outside [0, 1]")]
    OutOfRange { index: usize, value: f64 },

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

#[derive(Error, Debug, PartialEq)]
pub enum RankError {
    #[error("Could not generate valid career predictions")]
    EmptyPrediction,

    #[error("Got {probabilities} probabilities for {classes} classes")]
    LengthMismatch { probabilities: usize, classes: usize },
}

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact: {0}")]
    Invalid(String),
}

/// Any failure on the scoring path.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error(transparent)]
    Align(#[from] AlignError),

    #[error(transparent)]
    Scaling(#[from] ScalingError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Rank(#[from] RankError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
