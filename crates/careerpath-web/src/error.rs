//! Boundary error type: every stage failure ends up here and is rendered
//! as `{"detail": "..."}` with a matching status code.

use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use careerpath_common::CareerError;
use careerpath_model::error::{AlignError, ModelError, ScoringError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing, not JSON, or a field absent / of the wrong type
    #[error("{message}")]
    Validation { status: StatusCode, message: String },

    #[error(transparent)]
    Input(#[from] CareerError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Not Found")]
    NotFound,

    /// Catch-all, including handler panics
    #[error("{0}")]
    Unexpected(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { status, .. } => *status,
            ApiError::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Model(_) | ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing message, prefixed by the stage that failed.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Model(ModelError::Align(e @ AlignError::SchemaMismatch { .. })) => e.to_string(),
            ApiError::Model(ModelError::Align(e)) => format!("Error in data scaling: {}", e),
            ApiError::Model(ModelError::Scaling(e)) => format!("Error in data scaling: {}", e),
            ApiError::Model(ModelError::Scoring(e @ ScoringError::ScalerNotInitialized)) => {
                format!("Error in data scaling: {}", e)
            }
            ApiError::Model(ModelError::Scoring(e)) => format!("Error in making prediction: {}", e),
            ApiError::Model(ModelError::Rank(e)) => format!("Error in making prediction: {}", e),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}

/// Response for a panic caught by `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };
    tracing::error!("Global error: {}", message);
    ApiError::Unexpected(message).into_response()
}
