//! Business Records
//!
//! One row of the append-only business store. Rows are never updated, so
//! the types here carry no setters.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::logic::features::layout::{IDX_PAYMENT_DELAYS, IDX_REVENUE, IDX_SENTIMENT, IDX_TRANSACTIONS};
use crate::logic::features::{AnalysisInput, FeatureVector, FEATURE_COUNT};
use crate::logic::risk::RiskLevel;

/// A stored business row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: i64,
    pub monthly_revenue: f64,
    pub payment_delays: f64,
    pub transactions: i64,
    pub avg_sentiment: f64,
    pub risk_label: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl BusinessRecord {
    /// Feature vector in training column order
    pub fn features(&self) -> FeatureVector {
        let mut values = [0.0f64; FEATURE_COUNT];
        values[IDX_REVENUE] = self.monthly_revenue;
        values[IDX_PAYMENT_DELAYS] = self.payment_delays;
        values[IDX_TRANSACTIONS] = self.transactions as f64;
        values[IDX_SENTIMENT] = self.avg_sentiment;
        FeatureVector::from_values(values)
    }

    /// Training label; `None` for unlabeled rows or values other than 0/1
    pub fn label(&self) -> Option<u8> {
        match self.risk_label {
            Some(0) => Some(0),
            Some(1) => Some(1),
            _ => None,
        }
    }
}

/// A row about to be inserted; `id` and `created_at` come from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBusinessRecord {
    pub monthly_revenue: f64,
    pub payment_delays: f64,
    pub transactions: i64,
    pub avg_sentiment: f64,
    pub risk_label: Option<i64>,
}

impl NewBusinessRecord {
    /// Row for a caller-supplied labeled example
    pub fn from_input(input: &AnalysisInput, risk_label: Option<i64>) -> Self {
        Self {
            monthly_revenue: input.revenue,
            payment_delays: input.payment_delay,
            transactions: input.transactions,
            avg_sentiment: input.sentiment,
            risk_label,
        }
    }

    /// Row recorded after an analysis: labeled 1 only when the engine said High
    pub fn from_analysis(input: &AnalysisInput, risk: RiskLevel) -> Self {
        Self::from_input(input, Some(risk.as_label()))
    }
}
