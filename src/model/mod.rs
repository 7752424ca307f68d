//! Model Module - classifier, forest, and persisted artifact
//!
//! The trainer fits a [`RandomForest`] and wraps it in a [`ModelArtifact`];
//! the server only ever reads artifacts.

pub mod classifier;
pub mod forest;
pub mod metrics;
pub mod artifact;

pub use classifier::{Classifier, ModelError};
pub use forest::{ForestParams, RandomForest};
pub use metrics::{evaluate, EvaluationReport};
pub use artifact::{ArtifactError, ModelArtifact, Prediction};
