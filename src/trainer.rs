//! Trainer - offline pipeline from labeled CSV to model artifact
//!
//! ```text
//! CSV ─▶ drop id ─▶ drop incomplete ─▶ encode ─▶ split 80/20 ─▶ fit forest
//!                                                     │               │
//!                                                     └─ evaluate ◀───┘
//!                                                              │
//!                                                   atomic write of artifact
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::TrainingConfig;
use crate::dataset::{self, CleanReport, DatasetError};
use crate::model::{
    evaluate, ArtifactError, Classifier, EvaluationReport, ForestParams, ModelArtifact,
    ModelError, RandomForest,
};

#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error("Failed to create output directory '{}': {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Training failed: {0}")]
    Model(#[from] ModelError),

    #[error("Failed to save model: {0}")]
    Artifact(#[from] ArtifactError),
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub model_path: PathBuf,
    pub checksum: String,
    pub clean: CleanReport,
    pub train_rows: usize,
    pub test_rows: usize,
    pub holdout: EvaluationReport,
}

/// Run the pipeline and log the outcome. Errors are logged, never raised,
/// and leave any previous artifact untouched.
pub fn train_and_save_model(
    dataset_path: &Path,
    output_dir: &Path,
    output_filename: &str,
    config: &TrainingConfig,
) {
    match try_train_and_save_model(dataset_path, output_dir, output_filename, config) {
        Ok(summary) => {
            tracing::info!("Model saved as '{}'", summary.model_path.display());
        }
        Err(TrainError::Dataset(DatasetError::FileNotFound(path))) => {
            let dir = path.parent().map(|p| p.display().to_string()).unwrap_or_default();
            tracing::error!(
                "The file '{}' was not found. Please make sure the CSV file is in the '{}' directory.",
                path.display(),
                dir
            );
        }
        Err(e) => {
            tracing::error!("An unexpected error occurred during training: {}", e);
        }
    }
}

/// Fallible form of [`train_and_save_model`]
pub fn try_train_and_save_model(
    dataset_path: &Path,
    output_dir: &Path,
    output_filename: &str,
    config: &TrainingConfig,
) -> Result<TrainingSummary, TrainError> {
    tracing::info!("Starting model training process...");

    ensure_output_dir(output_dir)?;

    let table = dataset::load_csv(dataset_path)?;
    tracing::info!("Data loaded successfully from {}", dataset_path.display());

    let (encoded, clean) = dataset::prepare(table)?;
    tracing::info!(
        "Cleaned dataset: {} rows read, {} dropped for missing values, {} retained",
        clean.input_rows,
        clean.dropped_rows,
        clean.retained_rows
    );

    let (train, test) = dataset::train_test_split(&encoded, config.test_size, config.seed)?;
    tracing::info!(
        "Split: {} train / {} test (seed {})",
        train.len(),
        test.len(),
        config.seed
    );

    let mut forest = RandomForest::new(ForestParams {
        n_estimators: config.n_estimators,
        seed: config.seed,
    });
    forest.fit(&train.rows, &train.labels)?;
    tracing::info!("Random Forest model trained successfully ({} trees)", config.n_estimators);

    let holdout = evaluate(&forest, &test)?;
    tracing::info!(
        "Hold-out: accuracy={:.4} precision={:.4} recall={:.4} f1={:.4} (n={})",
        holdout.accuracy,
        holdout.precision,
        holdout.recall,
        holdout.f1,
        holdout.samples
    );

    let artifact = ModelArtifact::new(forest, train.len(), test.len()).with_holdout(holdout.clone());
    let model_path = output_dir.join(output_filename);
    let checksum = artifact.save(&model_path)?;
    tracing::debug!("Artifact sha256={}", checksum);

    Ok(TrainingSummary {
        model_path,
        checksum,
        clean,
        train_rows: train.len(),
        test_rows: test.len(),
        holdout,
    })
}

fn ensure_output_dir(dir: &Path) -> Result<(), TrainError> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| TrainError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    tracing::info!("Created directory: {}", dir.display());
    Ok(())
}
