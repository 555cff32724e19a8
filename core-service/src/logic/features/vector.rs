//! Feature Vector
//!
//! Four `f64` values in `FEATURE_LAYOUT` order, tagged with the layout
//! version and hash they were built under.

use serde::{Deserialize, Serialize};
use super::input::AnalysisInput;
use super::layout::{
    FEATURE_COUNT, FEATURE_VERSION, FEATURE_LAYOUT,
    IDX_PAYMENT_DELAYS, IDX_REVENUE, IDX_SENTIMENT, IDX_TRANSACTIONS,
    layout_hash,
};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Build the model input from a request.
    ///
    /// `transactions` is already an integer count; it is widened to f64 so the
    /// whole vector shares one numeric type.
    pub fn from_input(input: &AnalysisInput) -> Self {
        let mut values = [0.0f64; FEATURE_COUNT];
        values[IDX_REVENUE] = input.revenue;
        values[IDX_PAYMENT_DELAYS] = input.payment_delay;
        values[IDX_TRANSACTIONS] = input.transactions as f64;
        values[IDX_SENTIMENT] = input.sentiment;
        Self::from_values(values)
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn monthly_revenue(&self) -> f64 {
        self.values[IDX_REVENUE]
    }

    pub fn payment_delays(&self) -> f64 {
        self.values[IDX_PAYMENT_DELAYS]
    }

    pub fn transactions(&self) -> f64 {
        self.values[IDX_TRANSACTIONS]
    }

    pub fn avg_sentiment(&self) -> f64 {
        self.values[IDX_SENTIMENT]
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

/// Feature Engineer entry point: request fields → ordered feature vector
pub fn engineer_features(input: &AnalysisInput) -> FeatureVector {
    FeatureVector::from_input(input)
}
