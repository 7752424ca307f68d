//! Classifier capability shared by training and serving.

use crate::features::{FeatureRow, Label};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Model has not been fitted")]
    NotFitted,

    #[error("Cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error("Got {rows} rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Classifier error: {0}")]
    Backend(String),
}

/// Binary classifier over layout-ordered feature rows.
///
/// `predict_proba` returns the probability of [`Label::Ckd`].
pub trait Classifier {
    fn fit(&mut self, rows: &[FeatureRow], labels: &[Label]) -> Result<(), ModelError>;

    fn predict_proba(&self, row: &FeatureRow) -> Result<f64, ModelError>;

    /// Ties go to the negative class
    fn predict(&self, row: &FeatureRow) -> Result<Label, ModelError> {
        let p = self.predict_proba(row)?;
        Ok(if p > 0.5 { Label::Ckd } else { Label::NotCkd })
    }

    fn is_fitted(&self) -> bool;
}

pub(crate) fn check_training_input(rows: &[FeatureRow], labels: &[Label]) -> Result<(), ModelError> {
    if rows.len() != labels.len() {
        return Err(ModelError::LengthMismatch {
            rows: rows.len(),
            labels: labels.len(),
        });
    }
    if rows.is_empty() {
        return Err(ModelError::EmptyTrainingSet);
    }
    Ok(())
}
