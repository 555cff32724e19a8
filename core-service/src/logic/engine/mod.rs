//! Engine Module - Risk Engine
//!
//! Composes the feature engineer, deterministic scorer, predictor and risk
//! classifier into one `analyze` call. `analyze` has no side effects beyond
//! two status counters; persistence and retraining belong to the caller.

pub mod shared;

#[cfg(test)]
mod tests;

pub use shared::SharedEngine;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::api::engine_status::{EngineStatus, ModelStatus};
use crate::logic::features::{engineer_features, AnalysisInput, LayoutInfo};
use crate::logic::model::{ArtifactPaths, PredictionMethod, Predictor};
use crate::logic::risk::{classify_with_thresholds, RiskLevel, RiskThresholds};
use crate::logic::scoring::{self, FactorScores, Grade, ScoringCalibration};

// ============================================================================
// CONFIG / RESULT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub artifacts: ArtifactPaths,
    pub calibration: ScoringCalibration,
    pub thresholds: RiskThresholds,
}

impl EngineConfig {
    pub fn with_artifacts(artifacts: ArtifactPaths) -> Self {
        Self { artifacts, ..Default::default() }
    }
}

/// What the caller gets back for one business
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub grade: Grade,
    pub risk: RiskLevel,
    pub ml_risk_probability: f64,
    pub factors: FactorScores,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug)]
pub struct RiskEngine {
    config: EngineConfig,
    predictor: Predictor,
    predictions: AtomicU64,
    fallbacks: AtomicU64,
}

impl RiskEngine {
    /// Load artifacts from the configured paths. Never fails: missing or
    /// invalid artifacts put the engine in degraded mode.
    pub fn load(config: EngineConfig) -> Self {
        let predictor = Predictor::load(&config.artifacts);
        Self::with_predictor(config, predictor)
    }

    pub fn with_predictor(config: EngineConfig, predictor: Predictor) -> Self {
        if !predictor.is_loaded() {
            log::warn!("Risk engine started without a model; ML probability fixed at fallback");
        }
        Self {
            config,
            predictor,
            predictions: AtomicU64::new(0),
            fallbacks: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn model_loaded(&self) -> bool {
        self.predictor.is_loaded()
    }

    pub fn analyze(&self, input: &AnalysisInput) -> AnalysisResult {
        let vector = engineer_features(input);
        log::trace!("Features: {}", vector.to_log_entry());
        let deterministic = scoring::score(&vector, &self.config.calibration);

        let prediction = self.predictor.predict(&vector);
        self.predictions.fetch_add(1, Ordering::Relaxed);
        if prediction.method == PredictionMethod::Fallback {
            self.fallbacks.fetch_add(1, Ordering::Relaxed);
        }

        let risk = classify_with_thresholds(prediction.probability, deterministic.score, &self.config.thresholds);

        log::debug!(
            "Analyzed: score={} grade={} p={:.3} risk={} via {:?}",
            deterministic.score,
            deterministic.grade,
            prediction.probability,
            risk,
            prediction.method
        );

        AnalysisResult {
            score: deterministic.score,
            grade: deterministic.grade,
            risk,
            ml_risk_probability: round2(prediction.probability),
            factors: deterministic.factors,
        }
    }

    pub fn status(&self) -> EngineStatus {
        let layout = LayoutInfo::current();

        let model = match &self.predictor {
            Predictor::Loaded(loaded) => {
                let info = loaded.info();
                ModelStatus {
                    engine: loaded.model_name().to_string(),
                    loaded: true,
                    run_id: info.run_id,
                    trained_at: info.trained_at,
                    trained_on_records: info.trained_on_records,
                    fingerprint: info.fingerprint.clone(),
                    metrics: info.metrics,
                    unavailable_reason: None,
                }
            }
            Predictor::Unavailable { reason } => ModelStatus {
                engine: "fallback".to_string(),
                loaded: false,
                run_id: None,
                trained_at: None,
                trained_on_records: None,
                fingerprint: None,
                metrics: None,
                unavailable_reason: Some(reason.clone()),
            },
        };

        EngineStatus {
            feature_version: layout.version,
            layout_hash: layout.hash,
            feature_count: layout.feature_count,
            feature_names: layout.feature_names,
            model,
            predictions: self.predictions.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
        }
    }
}
