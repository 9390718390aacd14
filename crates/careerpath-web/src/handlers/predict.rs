//! Career prediction API — engineers features and ranks careers.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use careerpath_common::{PredictionResult, StudentRecord};
use careerpath_features::engineer;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::state::SharedState;

/// POST /predict — Top-3 careers for a student record
pub async fn predict(
    State(state): State<SharedState>,
    payload: Result<Json<StudentRecord>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let Json(student) = payload.map_err(|rejection| {
        warn!("Rejected prediction request: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    info!("Received prediction request");
    info!("Input data: {:?}", student);

    if state.validation.enforce_score_range {
        student.check_ranges().map_err(|e| {
            warn!("Rejected out-of-range input: {}", e);
            ApiError::from(e)
        })?;
    } else {
        let out_of_range = student.out_of_range();
        if !out_of_range.is_empty() {
            warn!("Out-of-range input accepted: {:?}", out_of_range);
        }
    }

    let features = engineer(&student);
    info!("Features engineered successfully");
    info!(
        "Processed features columns: {:?}",
        features.columns().map(|(name, _)| name).collect::<Vec<_>>()
    );

    let result = state.predictor.predict(&features).map_err(|e| {
        let err = ApiError::from(e);
        error!("Prediction failed: {}", err.detail());
        error!("Data that caused the error: {:?}", features);
        err
    })?;

    Ok(Json(result))
}
