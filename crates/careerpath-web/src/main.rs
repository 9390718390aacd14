//! careerpath server
//!
//! Run with: cargo run -p careerpath-web

use anyhow::Context;
use careerpath_config::Config;
use careerpath_model::{artifacts::load_scorer, CareerPredictor};
use careerpath_web::{router::build_router, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config loading logs too; give it a default subscriber until the
    // configured level is known.
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    let config = tracing::subscriber::with_default(bootstrap, Config::load)?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting careerpath server...");

    // Artifacts must load before we accept traffic; failure is fatal
    let scorer = load_scorer(&config.artifacts.model_path, &config.artifacts.scaler_path)
        .context("Failed to load model artifacts")?;
    let state = AppState::new(CareerPredictor::new(scorer), config.validation.clone());

    let app = build_router(state, &config.server.cors_origin)
        .with_context(|| format!("Invalid CORS origin: {}", config.server.cors_origin))?;

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
