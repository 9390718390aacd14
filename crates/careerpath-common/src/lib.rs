//! careerpath-common — Shared types, errors, and lookup tables used across all careerpath crates.

pub mod error;
pub mod entities;
pub mod career_map;
pub mod lenient;

// Re-export commonly used types
pub use entities::{StudentRecord, FeatureRecord, Prediction, PredictionResult, SUBJECT_COUNT};
pub use error::{CareerError, Result};
