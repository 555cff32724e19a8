//! Inference - ML Predictor
//!
//! Holds the loaded (classifier, scaler) pair or nothing at all. Every
//! failure path ends in the fixed fallback prediction; nothing here returns
//! an error to the request.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{FALLBACK_LABEL, FALLBACK_PROBABILITY};
use crate::logic::features::FeatureVector;
use crate::logic::trainer::metrics::EvaluationMetrics;
use super::artifact::{ArtifactBundle, ArtifactPaths};
use super::scaler::StandardScaler;
use super::ModelError;

// ============================================================================
// MODEL TRAIT
// ============================================================================

/// Trait for binary risk classifiers operating on scaled features
pub trait RiskModel: Send + Sync {
    /// Probability of the positive ("high risk") class
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Hard 0/1 prediction
    fn predict(&self, features: &[f64]) -> Result<u8, ModelError> {
        Ok(u8::from(self.predict_proba(features)? > 0.5))
    }

    fn name(&self) -> &str;
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    Model,
    Fallback,
}

/// Prediction output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// P(high risk), 0.0 - 1.0
    pub probability: f64,
    /// Classifier's hard label (0 or 1)
    pub label: u8,
    pub method: PredictionMethod,
}

impl PredictionResult {
    pub fn fallback() -> Self {
        Self {
            probability: FALLBACK_PROBABILITY,
            label: FALLBACK_LABEL,
            method: PredictionMethod::Fallback,
        }
    }
}

/// Where a loaded model came from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub run_id: Option<Uuid>,
    pub trained_at: Option<DateTime<Utc>>,
    pub trained_on_records: Option<usize>,
    pub metrics: Option<EvaluationMetrics>,
    /// SHA-256 of the model file as read from disk
    pub fingerprint: Option<String>,
}

/// A usable classifier + scaler pair
pub struct LoadedModel {
    model: Arc<dyn RiskModel>,
    scaler: StandardScaler,
    info: ModelInfo,
}

impl LoadedModel {
    pub fn new(model: Arc<dyn RiskModel>, scaler: StandardScaler, info: ModelInfo) -> Self {
        Self { model, scaler, info }
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, ModelError> {
        let scaled = self.scaler.transform_row(vector.as_slice())?;

        let probability = self.model.predict_proba(&scaled)?;
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(ModelError::NonFinite("model probability"));
        }

        let label = self.model.predict(&scaled)?;

        Ok(PredictionResult {
            probability,
            label,
            method: PredictionMethod::Model,
        })
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("model", &self.model.name())
            .field("scaler", &self.scaler)
            .field("info", &self.info)
            .finish()
    }
}

// ============================================================================
// PREDICTOR
// ============================================================================

/// Predictor state: a loaded model, or degraded mode
#[derive(Debug)]
pub enum Predictor {
    Loaded(LoadedModel),
    Unavailable { reason: String },
}

impl Predictor {
    /// Load the artifact pair; any failure yields `Unavailable`
    pub fn load(paths: &ArtifactPaths) -> Self {
        match super::artifact::load(paths) {
            Ok(bundle) => {
                log::info!(
                    "Model loaded from {} (run {}, {} trees)",
                    paths.model.display(),
                    bundle.metadata.run_id,
                    bundle.model.n_trees()
                );
                Self::from_bundle(bundle)
            }
            Err(e) => {
                log::warn!("Model artifacts unavailable ({}), running in degraded mode", e);
                Self::Unavailable { reason: e.to_string() }
            }
        }
    }

    pub fn from_bundle(bundle: ArtifactBundle) -> Self {
        let info = ModelInfo {
            run_id: Some(bundle.metadata.run_id),
            trained_at: Some(bundle.metadata.trained_at),
            trained_on_records: Some(bundle.metadata.training_records),
            metrics: Some(bundle.metadata.metrics),
            fingerprint: Some(bundle.fingerprint),
        };
        Self::Loaded(LoadedModel::new(Arc::new(bundle.model), bundle.scaler, info))
    }

    /// Wrap an arbitrary model (custom engines, tests)
    pub fn with_model(model: Arc<dyn RiskModel>, scaler: StandardScaler) -> Self {
        Self::Loaded(LoadedModel::new(model, scaler, ModelInfo::default()))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable { reason: reason.into() }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Predict, mapping every failure to the fallback
    pub fn predict(&self, vector: &FeatureVector) -> PredictionResult {
        match self {
            Self::Unavailable { .. } => PredictionResult::fallback(),
            Self::Loaded(loaded) => match loaded.predict(vector) {
                Ok(result) => result,
                Err(e) => {
                    log::warn!("Prediction failed ({}), using fallback", e);
                    PredictionResult::fallback()
                }
            },
        }
    }
}
