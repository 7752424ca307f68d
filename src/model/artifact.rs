//! Model Artifact - persisted trained forest
//!
//! Written once per training run, read once at server start. The file is
//! JSON; it carries the feature layout it was trained with so the server can
//! refuse an artifact built against a different column order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::features::{FeatureVector, Label, LayoutInfo, LayoutMismatchError};

use super::classifier::{Classifier, ModelError};
use super::forest::RandomForest;
use super::metrics::EvaluationReport;

/// Bumped when the artifact structure changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

pub const MODEL_TYPE: &str = "random_forest";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Model file '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt model file: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("Unsupported artifact format v{found} (expected v{expected})")]
    UnsupportedFormat { found: u32, expected: u32 },

    #[error("Model file holds no usable trees")]
    Malformed,
}

/// Output of one prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Label,
    /// Probability of CKD in [0, 1]
    pub probability: f64,
}

impl Prediction {
    /// Probability as a percentage with two decimals, e.g. `"87.00%"`
    pub fn probability_percent(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub model_type: String,
    pub layout: LayoutInfo,
    pub trained_at: DateTime<Utc>,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Scores on the held-out partition, when one was evaluated
    pub holdout: Option<EvaluationReport>,
    pub forest: RandomForest,
}

impl ModelArtifact {
    pub fn new(forest: RandomForest, train_rows: usize, test_rows: usize) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            model_type: MODEL_TYPE.to_string(),
            layout: LayoutInfo::current(),
            trained_at: Utc::now(),
            train_rows,
            test_rows,
            holdout: None,
            forest,
        }
    }

    pub fn with_holdout(mut self, report: EvaluationReport) -> Self {
        self.holdout = Some(report);
        self
    }

    /// Classify one full feature vector
    pub fn predict(&self, vector: &FeatureVector) -> Result<Prediction, ModelError> {
        let row = vector.as_row();
        Ok(Prediction {
            label: self.forest.predict(row)?,
            probability: self.forest.predict_proba(row)?,
        })
    }

    /// Write atomically: serialize to a sibling temp file, then rename over
    /// `path`. Returns the SHA-256 of the written bytes.
    pub fn save(&self, path: &Path) -> Result<String, ArtifactError> {
        let bytes = serde_json::to_vec(self)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

        fs::write(&tmp_path, &bytes)?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        Ok(checksum(&bytes))
    }

    /// Read and validate an artifact. Returns it with the file checksum.
    pub fn load(path: &Path) -> Result<(Self, String), ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let artifact: ModelArtifact = serde_json::from_slice(&bytes)?;

        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedFormat {
                found: artifact.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }
        artifact.layout.validate()?;
        if !artifact.forest.is_well_formed() {
            return Err(ArtifactError::Malformed);
        }

        Ok((artifact, checksum(&bytes)))
    }
}

/// Hex SHA-256 of a byte slice
pub fn checksum(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
