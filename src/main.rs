//! Prediction server
//!
//! Loads the trained artifact once and serves `POST /predict`. A missing or
//! unusable artifact does not stop the server; predictions answer 500 until
//! the trainer has run and the server is restarted.

use std::net::SocketAddr;

use anyhow::Context;
use ckd_predictor::{create_router, init_tracing, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before the subscriber reads RUST_LOG
    dotenvy::dotenv().ok();
    init_tracing("ckd_predictor=debug,tower_http=debug");

    let config = Config::from_env();

    tracing::info!("Kidney disease prediction server starting...");
    tracing::info!("Model path: {}", config.model_path().display());

    let port = config.port;
    let state = AppState::load(config);
    if !state.model_available() {
        tracing::warn!("Serving without a model; /predict will return 500");
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
