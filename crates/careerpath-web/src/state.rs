//! Shared application state for the web server.

use std::sync::Arc;

use careerpath_config::ValidationConfig;
use careerpath_model::CareerPredictor;

/// Shared state injected into every Axum handler.
/// Everything here is read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    pub predictor: CareerPredictor,
    pub validation: ValidationConfig,
}

impl AppState {
    pub fn new(predictor: CareerPredictor, validation: ValidationConfig) -> Self {
        Self { predictor, validation }
    }
}

pub type SharedState = Arc<AppState>;
