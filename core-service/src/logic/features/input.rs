//! Analysis Input - raw request payload
//!
//! Every field is optional. Missing, `null` or non-numeric values coerce to 0;
//! numeric strings are parsed; integer fields truncate fractional values.
//! Out-of-range values (negative revenue, sentiment outside [-1, 1]) pass
//! through untouched; range checks are the caller's job.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Business metrics submitted for analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisInput {
    /// Monthly revenue
    #[serde(deserialize_with = "lenient_f64")]
    pub revenue: f64,

    /// Average payment delay in days
    #[serde(deserialize_with = "lenient_f64")]
    pub payment_delay: f64,

    /// Transaction count
    #[serde(deserialize_with = "lenient_i64")]
    pub transactions: i64,

    /// Externally supplied sentiment in [-1, 1]
    #[serde(deserialize_with = "lenient_f64")]
    pub sentiment: f64,

    /// Activity frequency (not a model feature)
    #[serde(deserialize_with = "lenient_i64")]
    pub activity_freq: i64,
}

impl AnalysisInput {
    /// Parse a request body, falling back to an all-zero input when the body
    /// is not a JSON object.
    pub fn from_json_lenient(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            Ok(_) | Err(_) => {
                log::debug!("Analysis body is not a JSON object, using defaults");
                Self::default()
            }
        }
    }
}

// ============================================================================
// COERCION
// ============================================================================

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_i64(&value))
}

pub(crate) fn coerce_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

pub(crate) fn coerce_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or_else(|| coerce_f64(value).trunc() as i64),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .unwrap_or_else(|_| coerce_f64(value).trunc() as i64),
        _ => coerce_f64(value).trunc() as i64,
    }
}
