//! careerpath-web — HTTP boundary for the career predictor.
//! Provides:
//!   - `GET  /health`  liveness probe
//!   - `POST /predict` top-3 careers for a student record

pub mod router;
pub mod handlers;
pub mod state;
pub mod error;
