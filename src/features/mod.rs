//! Features Module - the schema shared by training and serving
//!
//! Both the trainer and the prediction endpoint build rows from this module,
//! so column order cannot drift between them.

pub mod layout;
pub mod encoding;
pub mod vector;

pub use layout::{
    FeatureRow, LayoutInfo, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT, USER_FEATURES,
};
pub use encoding::Label;
pub use vector::{FeatureVector, VectorError};
