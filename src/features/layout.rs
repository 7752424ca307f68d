//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema shared by the trainer and the server.**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The forest consumes rows positionally, so an artifact trained against a
//! different layout must never be served.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Vitals / urinalysis (0-8) ===
    "age",    // 0: Age in years
    "bp",     // 1: Blood pressure (mm/Hg)
    "sg",     // 2: Specific gravity
    "al",     // 3: Albumin (0-5)
    "su",     // 4: Sugar (0-5)
    "rbc",    // 5: Red blood cells (normal=1)
    "pc",     // 6: Pus cell (normal=1)
    "pcc",    // 7: Pus cell clumps (present=1)
    "ba",     // 8: Bacteria (present=1)

    // === Blood chemistry (9-17) ===
    "bgr",    // 9: Blood glucose random (mgs/dl)
    "bu",     // 10: Blood urea (mgs/dl)
    "sc",     // 11: Serum creatinine (mgs/dl)
    "sod",    // 12: Sodium (mEq/L)
    "pot",    // 13: Potassium (mEq/L)
    "hemo",   // 14: Hemoglobin (gms)
    "pcv",    // 15: Packed cell volume
    "wc",     // 16: White blood cell count (cells/cumm)
    "rc",     // 17: Red blood cell count (millions/cmm)

    // === History / symptoms (18-23) ===
    "htn",    // 18: Hypertension (yes=1)
    "dm",     // 19: Diabetes mellitus (yes=1)
    "cad",    // 20: Coronary artery disease (yes=1)
    "appet",  // 21: Appetite (good=1)
    "pe",     // 22: Pedal edema (yes=1)
    "ane",    // 23: Anemia (yes=1)
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 24;

/// Fields the prediction endpoint reads from the request body.
/// Every other field is pinned to [`PLACEHOLDER_VALUE`].
pub const USER_FEATURES: &[&str] = &["age", "bp", "sg", "al", "su", "bgr", "sc", "hemo"];

/// Value used for any feature the caller did not supply
pub const PLACEHOLDER_VALUE: f64 = 0.0;

/// Identifier column present in the raw dataset, dropped before training
pub const ID_COLUMN: &str = "id";

/// Target column in the raw dataset
pub const TARGET_COLUMN: &str = "classification";

/// One row of features in layout order
pub type FeatureRow = [f64; FEATURE_COUNT];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over the layout version and the ordered feature names
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout information stored alongside a trained artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check this layout against the compiled one
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.hash)?;
        if self.feature_names.len() != FEATURE_COUNT
            || self.feature_names.iter().zip(FEATURE_LAYOUT).any(|(a, b)| a != b)
        {
            return Err(LayoutMismatchError {
                expected_version: FEATURE_VERSION,
                expected_hash: layout_hash(),
                actual_version: self.version,
                actual_hash: self.hash,
            });
        }
        Ok(())
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
     got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that a stored layout matches the current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

pub fn is_user_feature(name: &str) -> bool {
    USER_FEATURES.contains(&name)
}

// ============================================================================
// TESTS
// ============================================================================
