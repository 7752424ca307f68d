//! Dataset Module - tabular training data
//!
//! Loads the labeled CSV, drops the identifier column and incomplete records,
//! encodes categorical columns, and splits rows into train/test partitions.

pub mod loader;
pub mod encode;
pub mod split;

#[cfg(test)]
pub(crate) mod fixtures;

use std::path::PathBuf;

use crate::features::{FeatureRow, Label};

pub use encode::{prepare, CleanReport};
pub use loader::{load_csv, RawTable};
pub use split::train_test_split;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("The file '{}' was not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column '{0}' not found")]
    MissingColumn(String),

    #[error("Unmapped value '{value}' in column '{column}' (line {line})")]
    UnmappedValue { column: String, value: String, line: u64 },

    #[error("Invalid number '{value}' in column '{column}' (line {line})")]
    InvalidNumber { column: String, value: String, line: u64 },

    #[error("Invalid split: {0}")]
    InvalidSplit(String),
}

/// Encoded rows with their labels, index-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedDataset {
    pub rows: Vec<FeatureRow>,
    pub labels: Vec<Label>,
}

impl EncodedDataset {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            rows: Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, row: FeatureRow, label: Label) {
        self.rows.push(row);
        self.labels.push(label);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy out the rows at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> Self {
        let mut out = Self::with_capacity(indices.len());
        for &i in indices {
            out.push(self.rows[i], self.labels[i]);
        }
        out
    }

    pub fn positive_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_positive()).count()
    }
}
