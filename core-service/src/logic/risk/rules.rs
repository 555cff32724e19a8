//! Risk Thresholds

use serde::{Deserialize, Serialize};

/// Strictly above this probability = High
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Strictly above this probability (and not High) = Moderate
pub const MODERATE_RISK_THRESHOLD: f64 = 0.4;

/// Thresholds for classification (configurable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub high_above: f64,
    pub moderate_above: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_above: HIGH_RISK_THRESHOLD,
            moderate_above: MODERATE_RISK_THRESHOLD,
        }
    }
}
