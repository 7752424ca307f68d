//! Chronic kidney disease predictor
//!
//! A trainer that fits a random forest on the CKD dataset and a small HTTP
//! service that serves predictions from the saved artifact.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────── train (offline) ────────────────┐
//! │  CSV ─▶ dataset ─▶ model::RandomForest ─▶ JSON   │
//! └──────────────────────────┬───────────────────────┘
//!                            │ model/kidney_disease_model.json
//! ┌──────────────── server ──▼───────────────────────┐
//! │  AppState { Option<Arc<ModelArtifact>> }          │
//! │  GET /        static page                         │
//! │  GET /health  status                              │
//! │  POST /predict ─▶ features::FeatureVector ─▶ model │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Both halves build rows through [`features`], which owns the column order.

pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod handlers;
pub mod model;
pub mod trainer;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::Config;
pub use error::{AppError, AppResult};

use model::ModelArtifact;

/// Shared application state.
///
/// The model is loaded once before the listener starts and only read
/// afterwards; `None` means the service runs without a model.
#[derive(Clone)]
pub struct AppState {
    pub model: Option<Arc<ModelArtifact>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, model: Option<ModelArtifact>) -> Self {
        Self {
            model: model.map(Arc::new),
            config: Arc::new(config),
        }
    }

    /// Load the artifact named by `config`, degrading to "model unavailable"
    /// when it is missing or unusable.
    pub fn load(config: Config) -> Self {
        let path = config.model_path();

        let model = match ModelArtifact::load(&path) {
            Ok((artifact, checksum)) => {
                tracing::info!(
                    "Machine learning model loaded successfully from {} (trained {}, sha256 {})",
                    path.display(),
                    artifact.trained_at,
                    &checksum[..12]
                );
                Some(artifact)
            }
            Err(model::ArtifactError::NotFound(_)) => {
                tracing::error!(
                    "Model file '{}' not found. Please run the trainer first.",
                    path.display()
                );
                None
            }
            Err(e) => {
                tracing::error!("An error occurred while loading the model: {}", e);
                None
            }
        };

        Self::new(config, model)
    }

    pub fn model_available(&self) -> bool {
        self.model.is_some()
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Initialize logging; `RUST_LOG` overrides `default_filter`.
/// `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing(default_filter: &str) {
    let json = std::env::var("LOG_FORMAT").map_or(false, |v| v.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}
