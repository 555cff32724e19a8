//! Factor Sub-Scores
//!
//! Four independently meaningful 0-100 integer scores. Each raw value is
//! truncated toward zero, then clamped to [0, 100].

use serde::{Deserialize, Serialize};
use super::rules::ScoringCalibration;

/// Per-factor breakdown returned to the caller for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorScores {
    pub financial_stability: u8,
    pub sentiment: u8,
    pub behavioral: u8,
    pub activity: u8,
}

/// Truncate and clamp a raw factor value into [0, 100]
pub fn to_factor_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.trunc().clamp(0.0, 100.0) as u8
}

impl ScoringCalibration {
    /// Revenue (higher is better) blended with payment delay (lower is better)
    pub fn financial_stability(&self, revenue: f64, payment_delay: f64) -> u8 {
        let revenue_score = (revenue / self.revenue_cap * 100.0).min(100.0);
        let delay_score = (100.0 - payment_delay / self.payment_delay_cap_days * 100.0).max(0.0);

        to_factor_score(revenue_score * self.revenue_weight + delay_score * self.low_delay_weight)
    }

    /// Mostly punctuality, with some credit for transaction volume
    pub fn behavioral(&self, payment_delay: f64, transactions: f64) -> u8 {
        let punctuality = (100.0 - payment_delay * self.delay_penalty_per_day).max(0.0);
        let consistency = (transactions / self.transaction_cap * 100.0).min(100.0);

        to_factor_score(punctuality * self.punctuality_weight + consistency * self.consistency_weight)
    }

    /// Maps sentiment in [-1, 1] onto [0, 100]
    pub fn sentiment(&self, avg_sentiment: f64) -> u8 {
        to_factor_score((avg_sentiment + 1.0) / 2.0 * 100.0)
    }

    /// Transaction volume alone
    pub fn activity(&self, transactions: f64) -> u8 {
        to_factor_score(transactions / self.transaction_cap * 100.0)
    }

    /// Weighted blend of the four factors, rounded to the nearest integer
    pub fn overall(&self, factors: &FactorScores) -> u8 {
        let weighted = f64::from(factors.financial_stability) * self.financial_weight
            + f64::from(factors.behavioral) * self.behavioral_weight
            + f64::from(factors.sentiment) * self.sentiment_weight
            + f64::from(factors.activity) * self.activity_weight;

        if !weighted.is_finite() {
            return 0;
        }
        weighted.round().clamp(0.0, 100.0) as u8
    }
}
