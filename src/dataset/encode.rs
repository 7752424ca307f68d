//! Cleaning and encoding of the raw table into model-ready rows.

use crate::features::encoding::{encode_categorical, is_categorical};
use crate::features::layout::{FeatureRow, FEATURE_COUNT, FEATURE_LAYOUT, ID_COLUMN, TARGET_COLUMN};
use crate::features::Label;

use super::loader::RawTable;
use super::{DatasetError, EncodedDataset};

/// Row accounting for one cleaning pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Records read from the file
    pub input_rows: usize,
    /// Records discarded for having a missing value
    pub dropped_rows: usize,
    /// Records that went on to encoding
    pub retained_rows: usize,
    /// Columns present in the file but not part of the feature layout
    pub ignored_columns: Vec<String>,
}

/// Drop the id column and incomplete records, then encode every remaining
/// record in layout order.
pub fn prepare(mut table: RawTable) -> Result<(EncodedDataset, CleanReport), DatasetError> {
    let input_rows = table.len();

    table.drop_column(ID_COLUMN)?;
    let dropped_rows = table.drop_incomplete();

    let mut feature_cols = [0usize; FEATURE_COUNT];
    for (slot, name) in feature_cols.iter_mut().zip(FEATURE_LAYOUT) {
        *slot = table
            .column_index(name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;
    }
    let target_col = table
        .column_index(TARGET_COLUMN)
        .ok_or_else(|| DatasetError::MissingColumn(TARGET_COLUMN.to_string()))?;

    let ignored_columns: Vec<String> = table
        .headers
        .iter()
        .filter(|h| h.as_str() != TARGET_COLUMN && !FEATURE_LAYOUT.contains(&h.as_str()))
        .cloned()
        .collect();
    if !ignored_columns.is_empty() {
        tracing::warn!("Ignoring columns not in the feature layout: {:?}", ignored_columns);
    }

    let mut dataset = EncodedDataset::with_capacity(table.len());

    for record in &table.records {
        let cell = |idx: usize| record.cells[idx].as_deref().unwrap_or_default();

        let mut row: FeatureRow = [0.0; FEATURE_COUNT];
        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            row[i] = encode_value(name, cell(feature_cols[i]), record.line)?;
        }

        let raw_label = cell(target_col);
        let label = Label::from_raw(raw_label).ok_or_else(|| DatasetError::UnmappedValue {
            column: TARGET_COLUMN.to_string(),
            value: raw_label.to_string(),
            line: record.line,
        })?;

        dataset.push(row, label);
    }

    let report = CleanReport {
        input_rows,
        dropped_rows,
        retained_rows: dataset.len(),
        ignored_columns,
    };

    Ok((dataset, report))
}

fn encode_value(column: &str, raw: &str, line: u64) -> Result<f64, DatasetError> {
    if is_categorical(column) {
        return encode_categorical(column, raw).ok_or_else(|| DatasetError::UnmappedValue {
            column: column.to_string(),
            value: raw.to_string(),
            line,
        });
    }

    // `f64::from_str` also accepts "NAN" and "inf"; the forest needs finite inputs
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DatasetError::InvalidNumber {
            column: column.to_string(),
            value: raw.to_string(),
            line,
        }),
    }
}
