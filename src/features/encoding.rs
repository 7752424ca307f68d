//! Categorical encodings and the target label.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-valued categorical column and its `(positive, negative)` raw values.
/// The positive value encodes to 1, the negative one to 0.
pub const CATEGORICAL_MAPPINGS: &[(&str, &str, &str)] = &[
    ("rbc", "normal", "abnormal"),
    ("pc", "normal", "abnormal"),
    ("pcc", "present", "notpresent"),
    ("ba", "present", "notpresent"),
    ("htn", "yes", "no"),
    ("dm", "yes", "no"),
    ("cad", "yes", "no"),
    ("appet", "good", "poor"),
    ("pe", "yes", "no"),
    ("ane", "yes", "no"),
];

/// Returns true if the column needs categorical encoding
pub fn is_categorical(column: &str) -> bool {
    CATEGORICAL_MAPPINGS.iter().any(|(c, _, _)| *c == column)
}

/// Encode a categorical value. `None` if the column is not categorical
/// or the value is outside its mapping.
pub fn encode_categorical(column: &str, value: &str) -> Option<f64> {
    let (_, positive, negative) = CATEGORICAL_MAPPINGS.iter().find(|(c, _, _)| *c == column)?;
    if value == *positive {
        Some(1.0)
    } else if value == *negative {
        Some(0.0)
    } else {
        None
    }
}

// ============================================================================
// LABEL
// ============================================================================

/// Binary classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Ckd,
    NotCkd,
}

impl Label {
    pub const CKD_DISPLAY: &'static str = "Kidney Disease (CKD)";
    pub const NOT_CKD_DISPLAY: &'static str = "No Kidney Disease (Not CKD)";

    /// Parse the raw value of the `classification` column
    pub fn from_raw(value: &str) -> Option<Self> {
        match value {
            "ckd" => Some(Label::Ckd),
            "notckd" => Some(Label::NotCkd),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> &'static str {
        match self {
            Label::Ckd => "ckd",
            Label::NotCkd => "notckd",
        }
    }

    pub fn encode(&self) -> u8 {
        match self {
            Label::Ckd => 1,
            Label::NotCkd => 0,
        }
    }

    pub fn decode(value: u8) -> Option<Self> {
        match value {
            1 => Some(Label::Ckd),
            0 => Some(Label::NotCkd),
            _ => None,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Label::Ckd)
    }

    /// Human-readable text returned by the prediction endpoint
    pub fn display_text(&self) -> &'static str {
        match self {
            Label::Ckd => Self::CKD_DISPLAY,
            Label::NotCkd => Self::NOT_CKD_DISPLAY,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::layout::feature_index;

    #[test]
    fn test_categorical_columns_are_features() {
        for (column, _, _) in CATEGORICAL_MAPPINGS {
            assert!(feature_index(column).is_some(), "{} not in layout", column);
        }
        assert_eq!(CATEGORICAL_MAPPINGS.len(), 10);
    }

    #[test]
    fn test_encode_categorical() {
        assert_eq!(encode_categorical("rbc", "normal"), Some(1.0));
        assert_eq!(encode_categorical("rbc", "abnormal"), Some(0.0));
        assert_eq!(encode_categorical("pcc", "present"), Some(1.0));
        assert_eq!(encode_categorical("ba", "notpresent"), Some(0.0));
        assert_eq!(encode_categorical("appet", "good"), Some(1.0));
        assert_eq!(encode_categorical("appet", "poor"), Some(0.0));
        assert_eq!(encode_categorical("htn", "maybe"), None);
        assert_eq!(encode_categorical("age", "yes"), None);
    }

    #[test]
    fn test_encoded_values_are_binary() {
        for (column, positive, negative) in CATEGORICAL_MAPPINGS {
            for raw in [positive, negative] {
                let v = encode_categorical(column, raw).unwrap();
                assert!(v == 0.0 || v == 1.0);
            }
        }
    }

    #[test]
    fn test_label_round_trip() {
        let label = Label::from_raw("ckd").unwrap();
        assert_eq!(label.encode(), 1);
        assert_eq!(Label::decode(1).unwrap().display_text(), "Kidney Disease (CKD)");

        let label = Label::from_raw("notckd").unwrap();
        assert_eq!(label.encode(), 0);
        assert_eq!(Label::decode(0), Some(Label::NotCkd));
        assert_eq!(label.to_string(), "No Kidney Disease (Not CKD)");

        assert_eq!(Label::from_raw("ckd\t"), None);
        assert_eq!(Label::decode(2), None);
    }
}
