//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::features::layout::is_user_feature;
use crate::model::forest::{DEFAULT_N_ESTIMATORS, DEFAULT_SEED};

pub const DEFAULT_DATASET_PATH: &str = "data/kidney_disease_data.csv";
pub const DEFAULT_MODEL_DIR: &str = "model";
pub const DEFAULT_MODEL_FILENAME: &str = "kidney_disease_model.json";
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Training hyper-parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Share of cleaned rows held out for evaluation
    pub test_size: f64,

    /// Trees in the forest
    pub n_estimators: usize,

    /// Seed for the split and the forest
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            n_estimators: DEFAULT_N_ESTIMATORS,
            seed: DEFAULT_SEED,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Labeled CSV read by the trainer
    pub dataset_path: PathBuf,

    /// Directory holding the model artifact
    pub model_dir: PathBuf,

    /// Artifact file name inside `model_dir`
    pub model_filename: String,

    /// Landing page and assets
    pub static_dir: PathBuf,

    /// Prediction inputs that must be present in every request
    pub required_inputs: Vec<String>,

    pub training: TrainingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            model_filename: DEFAULT_MODEL_FILENAME.to_string(),
            static_dir: PathBuf::from("static"),
            required_inputs: Vec::new(),
            training: TrainingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            dataset_path: env::var("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),

            model_dir: env::var("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),

            model_filename: env::var("MODEL_FILENAME")
                .unwrap_or(defaults.model_filename),

            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),

            required_inputs: env::var("REQUIRED_INPUTS")
                .map(|v| parse_required_inputs(&v))
                .unwrap_or_default(),

            training: TrainingConfig {
                test_size: env::var("TRAIN_TEST_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TEST_SIZE),

                n_estimators: env::var("TRAIN_N_ESTIMATORS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_N_ESTIMATORS),

                seed: env::var("TRAIN_SEED")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_SEED),
            },
        }
    }

    /// Full path of the model artifact
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_filename)
    }
}

/// Parse a comma-separated field list, keeping only fields the endpoint reads
pub fn parse_required_inputs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| {
            let known = is_user_feature(s);
            if !known {
                tracing::warn!("Ignoring unknown required input '{}'", s);
            }
            known
        })
        .map(String::from)
        .collect()
}
