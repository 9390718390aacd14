//! careerpath-features — Derived statistics over a student's subject scores.

pub mod engineer;
pub mod stats;

pub use engineer::{engineer, RATIO_EPSILON};
