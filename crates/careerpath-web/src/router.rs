//! Axum router — maps URL paths to handlers and installs middleware.

use std::sync::Arc;

use axum::{
    http::{header::InvalidHeaderValue, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::error::handle_panic;
use crate::handlers::{
    health::{health_check, not_found},
    predict::predict,
};
use crate::state::{AppState, SharedState};

/// CORS for a single origin, with credentials. Other origins get no
/// allow-origin header. Request headers are mirrored back, since a
/// wildcard is not allowed alongside credentials.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(origin)?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build and return the full Axum router.
pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router, InvalidHeaderValue> {
    let shared: SharedState = Arc::new(state);

    Ok(Router::new()
        .route("/health",  get(health_check))
        .route("/predict", post(predict))
        .fallback(not_found)

        // Middleware
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(cors_origin)?)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared))
}
