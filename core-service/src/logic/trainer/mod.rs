//! Trainer Module
//!
//! Rebuilds the model artifact pair from the business store:
//!
//! ```text
//! records → labeled rows → seeded 80/20 split → fit scaler (train only)
//!         → fit forest on scaled rows → evaluate on held-out rows
//!         → write scaler.json, then model.json (same run id)
//! ```
//!
//! Nothing is written unless every earlier step succeeded, so a failed run
//! leaves the previous pair in place.

pub mod metrics;
pub mod split;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use ndarray::Axis;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::constants::MIN_TRAINING_RECORDS;
use crate::logic::dataset::{BusinessRecord, DatasetSummary, TrainingSet};
use crate::logic::model::artifact::{self, ArtifactError, ArtifactMetadata, ArtifactPaths};
use crate::logic::model::{ForestParams, ModelError, RandomForest, RiskModel, StandardScaler};
pub use metrics::{evaluate, EvaluationMetrics};
pub use split::train_test_split;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    pub test_fraction: f64,
    pub seed: u64,
    pub min_records: usize,
    pub forest: ForestParams,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            min_records: MIN_TRAINING_RECORDS,
            forest: ForestParams::default(),
        }
    }
}

// ============================================================================
// ERRORS / REPORT
// ============================================================================

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("need at least {required} labeled records, have {available}")]
    NotEnoughRecords { required: usize, available: usize },

    #[error("training data has a single class ({positives} high-risk, {negatives} other)")]
    SingleClass { positives: usize, negatives: usize },

    #[error("model fitting failed: {0}")]
    Model(#[from] ModelError),

    #[error("artifact write failed: {0}")]
    Artifact(#[from] ArtifactError),
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub run_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub dataset: DatasetSummary,
    pub train_size: usize,
    pub test_size: usize,
    pub metrics: EvaluationMetrics,
    pub fingerprint: String,
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
}

/// Fitted pair plus its held-out evaluation, not yet persisted
#[derive(Debug, Clone)]
pub struct FittedModel {
    pub model: RandomForest,
    pub scaler: StandardScaler,
    pub metrics: EvaluationMetrics,
    pub train_size: usize,
    pub test_size: usize,
}

// ============================================================================
// TRAINING
// ============================================================================

/// Check preconditions, split, fit, evaluate. Touches no files.
pub fn fit(set: &TrainingSet, config: &TrainerConfig) -> Result<FittedModel, TrainingError> {
    if set.len() < config.min_records {
        return Err(TrainingError::NotEnoughRecords {
            required: config.min_records,
            available: set.len(),
        });
    }
    if !set.has_both_classes() {
        return Err(TrainingError::SingleClass {
            positives: set.summary.positives,
            negatives: set.summary.negatives,
        });
    }

    let (train_idx, test_idx) = train_test_split(set.len(), config.test_fraction, config.seed);

    let x_train = set.features.select(Axis(0), &train_idx);
    let x_test = set.features.select(Axis(0), &test_idx);
    let y_train: Vec<u8> = train_idx.iter().map(|&i| set.labels[i]).collect();
    let y_test: Vec<u8> = test_idx.iter().map(|&i| set.labels[i]).collect();

    let scaler = StandardScaler::fit(x_train.view())?;
    let x_train = scaler.transform(x_train.view())?;
    let x_test = scaler.transform(x_test.view())?;

    log::info!(
        "Fitting forest: {} trees on {} rows ({} held out)",
        config.forest.n_trees,
        train_idx.len(),
        test_idx.len()
    );
    let model = RandomForest::fit(x_train.view(), &y_train, &config.forest)?;

    let predicted = x_test
        .rows()
        .into_iter()
        .map(|row| model.predict(&row.to_vec()))
        .collect::<Result<Vec<u8>, ModelError>>()?;
    let metrics = evaluate(&predicted, &y_test);

    Ok(FittedModel {
        model,
        scaler,
        metrics,
        train_size: train_idx.len(),
        test_size: test_idx.len(),
    })
}

/// Full run: build the training set, fit, then persist the pair
pub fn train(
    records: &[BusinessRecord],
    config: &TrainerConfig,
    paths: &ArtifactPaths,
) -> Result<TrainingReport, TrainingError> {
    let set = TrainingSet::from_records(records);
    log::info!(
        "Training on {} of {} records ({} unlabeled, {} invalid labels)",
        set.summary.labeled,
        set.summary.total_records,
        set.summary.unlabeled,
        set.summary.invalid_label
    );

    let fitted = fit(&set, config)?;
    let metadata = ArtifactMetadata::new(set.len(), fitted.metrics);
    let fingerprint = artifact::save(paths, &metadata, &fitted.model, &fitted.scaler)?;

    log::info!(
        "Training run {} done: accuracy {:.3}, precision {:.3}, recall {:.3}, f1 {:.3}",
        metadata.run_id,
        fitted.metrics.accuracy,
        fitted.metrics.precision,
        fitted.metrics.recall,
        fitted.metrics.f1
    );

    Ok(TrainingReport {
        run_id: metadata.run_id,
        trained_at: metadata.trained_at,
        dataset: set.summary,
        train_size: fitted.train_size,
        test_size: fitted.test_size,
        metrics: fitted.metrics,
        fingerprint,
        model_path: paths.model.clone(),
        scaler_path: paths.scaler.clone(),
    })
}
