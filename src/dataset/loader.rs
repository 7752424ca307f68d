//! CSV loading with missing-value normalization.

use std::path::Path;

use super::DatasetError;

/// Raw spellings read as "missing". `?` is the dataset's own sentinel;
/// the rest are the NA spellings common table exporters write (the same set
/// pandas treats as NA by default).
pub const MISSING_SENTINELS: &[&str] = &[
    "?", "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One data row; `None` marks a missing cell
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line in the source file
    pub line: u64,
    pub cells: Vec<Option<String>>,
}

impl RawRecord {
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

/// Loaded table, header order preserved
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove a column by name
    pub fn drop_column(&mut self, name: &str) -> Result<(), DatasetError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;

        self.headers.remove(idx);
        for record in &mut self.records {
            record.cells.remove(idx);
        }
        Ok(())
    }

    /// Drop every record with a missing cell; returns how many were dropped
    pub fn drop_incomplete(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(RawRecord::is_complete);
        before - self.records.len()
    }
}

/// Normalize one cell to `None` if it is a missing-value sentinel
pub fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if MISSING_SENTINELS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Load a CSV file with a header row
pub fn load_csv(path: &Path) -> Result<RawTable, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::FileNotFound(path.to_path_buf()));
    }

    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    read_table(reader)
}

/// Load CSV content from any reader (used by tests and tooling)
pub fn load_csv_from_reader<R: std::io::Read>(rdr: R) -> Result<RawTable, DatasetError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    read_table(reader)
}

fn read_table<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<RawTable, DatasetError> {
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let cells = record.iter().map(normalize_cell).collect();
        records.push(RawRecord { line, cells });
    }

    tracing::debug!("Read {} records with {} columns", records.len(), headers.len());

    Ok(RawTable { headers, records })
}
