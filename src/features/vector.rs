//! Feature vector assembly for prediction requests.

use serde_json::{Map, Value};

use super::layout::{
    feature_index, FeatureRow, FEATURE_COUNT, FEATURE_LAYOUT, PLACEHOLDER_VALUE, USER_FEATURES,
};

/// Reasons a partial feature map could not be turned into a row
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VectorError {
    #[error("Missing data field: '{0}'")]
    MissingField(String),

    #[error("Field '{field}' must be a number, got {found}")]
    NotANumber { field: String, found: String },
}

/// Full feature vector in layout order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: FeatureRow,
}

impl FeatureVector {
    /// Every field set to the placeholder
    pub fn new() -> Self {
        Self {
            values: [PLACEHOLDER_VALUE; FEATURE_COUNT],
        }
    }

    /// Build from a caller-supplied partial map.
    ///
    /// Only [`USER_FEATURES`] are read; any other key in `input` is ignored and
    /// its field stays at the placeholder. `null` is treated as absent.
    /// Fields named in `required` must be present.
    pub fn from_partial(input: &Map<String, Value>, required: &[String]) -> Result<Self, VectorError> {
        let mut vector = Self::new();

        for name in required {
            if input.get(name).map_or(true, Value::is_null) {
                return Err(VectorError::MissingField(name.clone()));
            }
        }

        for &name in USER_FEATURES {
            match input.get(name) {
                None | Some(Value::Null) => {}
                Some(value) => {
                    let number = value.as_f64().ok_or_else(|| VectorError::NotANumber {
                        field: name.to_string(),
                        found: value.to_string(),
                    })?;
                    vector.set(name, number);
                }
            }
        }

        Ok(vector)
    }

    /// Set a field by name; unknown names are ignored
    pub fn set(&mut self, name: &str, value: f64) {
        if let Some(idx) = feature_index(name) {
            self.values[idx] = value;
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|idx| self.values[idx])
    }

    pub fn as_row(&self) -> &FeatureRow {
        &self.values
    }

    /// Iterate `(name, value)` in layout order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}
