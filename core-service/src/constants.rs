//! Central Configuration Constants
//!
//! Single source of truth for engine-wide defaults.

use std::path::PathBuf;

/// App name
pub const APP_NAME: &str = "CredLens";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default location of the serialized classifier
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Default location of the fitted feature scaler
pub const DEFAULT_SCALER_PATH: &str = "scaler.json";

/// Probability returned when no usable model is loaded or inference fails.
/// Lands in the Moderate band so unscored requests are never reported as Low.
pub const FALLBACK_PROBABILITY: f64 = 0.5;

/// Hard label paired with [`FALLBACK_PROBABILITY`]
pub const FALLBACK_LABEL: u8 = 1;

/// Minimum labeled records required before a training run is attempted
pub const MIN_TRAINING_RECORDS: usize = 10;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model artifact path from environment or use default
pub fn get_model_path() -> PathBuf {
    std::env::var("MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH))
}

/// Get scaler artifact path from environment or use default
pub fn get_scaler_path() -> PathBuf {
    std::env::var("SCALER_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCALER_PATH))
}
