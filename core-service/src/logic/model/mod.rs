//! Model Module - ML Predictor
//!
//! Inference is kept apart from training and persistence so the engine can
//! swap in a freshly trained model without touching the scorer.
//!
//! - `scaler`: per-feature standardization
//! - `forest`: random-forest classifier
//! - `inference`: `RiskModel` trait + `Predictor` with fallback
//! - `artifact`: on-disk model/scaler pair

pub mod artifact;
pub mod forest;
pub mod inference;
pub mod scaler;

use thiserror::Error;

// Re-export common types
pub use artifact::{ArtifactBundle, ArtifactError, ArtifactMetadata, ArtifactPaths};
pub use forest::{ForestParams, RandomForest};
pub use inference::{LoadedModel, ModelInfo, PredictionMethod, PredictionResult, Predictor, RiskModel};
pub use scaler::StandardScaler;

/// Errors from fitting or evaluating a model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("no training rows")]
    EmptyInput,

    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{rows} rows but {labels} labels")]
    LabelMismatch { rows: usize, labels: usize },

    #[error("non-finite values in {0}")]
    NonFinite(&'static str),

    #[error("corrupt model: {0}")]
    Corrupt(String),
}
