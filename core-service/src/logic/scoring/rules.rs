//! Scoring Rules & Calibration
//!
//! Normalization caps and weights for the deterministic scorer.
//! Constants and the config that carries them; no scoring logic here.
//!
//! The caps are calibration values tuned against the expected data
//! distribution, not derived quantities.

use serde::{Deserialize, Serialize};

// ============================================================================
// NORMALIZATION CAPS
// ============================================================================

/// Monthly revenue at which the revenue sub-score saturates at 100
pub const REVENUE_CAP: f64 = 150_000.0;

/// Payment delay (days) at which the delay sub-score reaches 0
pub const PAYMENT_DELAY_CAP_DAYS: f64 = 120.0;

/// Transaction count at which activity/consistency saturate at 100
pub const TRANSACTION_CAP: f64 = 600.0;

/// Punctuality points lost per day of payment delay
pub const DELAY_PENALTY_PER_DAY: f64 = 1.5;

// ============================================================================
// SUB-SCORE WEIGHTS
// ============================================================================

/// Financial stability: revenue share (70%)
pub const REVENUE_WEIGHT: f64 = 0.7;

/// Financial stability: low-delay share (30%)
pub const LOW_DELAY_WEIGHT: f64 = 0.3;

/// Behavioral: punctuality share (80%)
pub const PUNCTUALITY_WEIGHT: f64 = 0.8;

/// Behavioral: transaction consistency share (20%)
pub const CONSISTENCY_WEIGHT: f64 = 0.2;

// ============================================================================
// OVERALL WEIGHTS
// ============================================================================

pub const FINANCIAL_WEIGHT: f64 = 0.3;
pub const BEHAVIORAL_WEIGHT: f64 = 0.3;
pub const SENTIMENT_WEIGHT: f64 = 0.2;
pub const ACTIVITY_WEIGHT: f64 = 0.2;

// ============================================================================
// GRADE THRESHOLDS
// ============================================================================

pub const GRADE_A_MIN: u8 = 85;
pub const GRADE_B_MIN: u8 = 70;
pub const GRADE_C_MIN: u8 = 55;

// ============================================================================
// CONFIGURABLE CALIBRATION (for runtime adjustment)
// ============================================================================

/// Calibration for the deterministic scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringCalibration {
    pub revenue_cap: f64,
    pub payment_delay_cap_days: f64,
    pub transaction_cap: f64,
    pub delay_penalty_per_day: f64,

    pub revenue_weight: f64,
    pub low_delay_weight: f64,
    pub punctuality_weight: f64,
    pub consistency_weight: f64,

    pub financial_weight: f64,
    pub behavioral_weight: f64,
    pub sentiment_weight: f64,
    pub activity_weight: f64,
}

impl Default for ScoringCalibration {
    fn default() -> Self {
        Self {
            revenue_cap: REVENUE_CAP,
            payment_delay_cap_days: PAYMENT_DELAY_CAP_DAYS,
            transaction_cap: TRANSACTION_CAP,
            delay_penalty_per_day: DELAY_PENALTY_PER_DAY,
            revenue_weight: REVENUE_WEIGHT,
            low_delay_weight: LOW_DELAY_WEIGHT,
            punctuality_weight: PUNCTUALITY_WEIGHT,
            consistency_weight: CONSISTENCY_WEIGHT,
            financial_weight: FINANCIAL_WEIGHT,
            behavioral_weight: BEHAVIORAL_WEIGHT,
            sentiment_weight: SENTIMENT_WEIGHT,
            activity_weight: ACTIVITY_WEIGHT,
        }
    }
}
