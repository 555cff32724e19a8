use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::logic::trainer::EvaluationMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub feature_version: u8,
    pub layout_hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,

    pub model: ModelStatus,
    pub predictions: u64,
    pub fallbacks: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub engine: String, // "random_forest" | "fallback"
    pub loaded: bool,
    pub run_id: Option<Uuid>,
    pub trained_at: Option<DateTime<Utc>>,
    pub trained_on_records: Option<usize>,
    pub fingerprint: Option<String>,
    pub metrics: Option<EvaluationMetrics>,
    pub unavailable_reason: Option<String>,
}
