//! Model Artifacts
//!
//! The trained classifier and its scaler live in two JSON files, each an
//! envelope of `{ metadata, payload }`. Both envelopes carry the same
//! `run_id`; a pair whose ids differ was torn by an interrupted write and is
//! rejected as a whole.
//!
//! Writes go to a uniquely named temp file in the target directory and are
//! renamed into place, scaler first and model last, so a reader never sees a
//! half-written file and concurrent writers never share a staging file.
//! A reader that lands between the two renames sees a run mismatch and
//! retries once.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::constants::{get_model_path, get_scaler_path};
use crate::logic::features::layout::{validate_layout, FEATURE_COUNT};
use crate::logic::features::{LayoutInfo, LayoutMismatchError};
use crate::logic::trainer::metrics::EvaluationMetrics;
use super::forest::RandomForest;
use super::scaler::StandardScaler;
use super::ModelError;

// ============================================================================
// PATHS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    pub fn new(model: impl Into<PathBuf>, scaler: impl Into<PathBuf>) -> Self {
        Self { model: model.into(), scaler: scaler.into() }
    }

    /// `model.json` + `scaler.json` inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("model.json"), dir.join("scaler.json"))
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::new(get_model_path(), get_scaler_path())
    }
}

// ============================================================================
// ENVELOPE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub run_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub training_records: usize,
    pub metrics: EvaluationMetrics,
}

impl ArtifactMetadata {
    pub fn new(training_records: usize, metrics: EvaluationMetrics) -> Self {
        let layout = LayoutInfo::current();
        Self {
            run_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            feature_version: layout.version,
            layout_hash: layout.hash,
            training_records,
            metrics,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    metadata: ArtifactMetadata,
    payload: T,
}

/// A validated model/scaler pair as read from disk
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub metadata: ArtifactMetadata,
    pub model: RandomForest,
    pub scaler: StandardScaler,
    /// SHA-256 (hex) of the model file
    pub fingerprint: String,
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model run {model} does not match scaler run {scaler}")]
    RunMismatch { model: Uuid, scaler: Uuid },

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error(transparent)]
    Invalid(#[from] ModelError),
}

// ============================================================================
// SAVE / LOAD
// ============================================================================

/// Persist a freshly trained pair. Returns the model file fingerprint.
pub fn save(
    paths: &ArtifactPaths,
    metadata: &ArtifactMetadata,
    model: &RandomForest,
    scaler: &StandardScaler,
) -> Result<String, ArtifactError> {
    let scaler_bytes = encode(&paths.scaler, metadata, scaler)?;
    let model_bytes = encode(&paths.model, metadata, model)?;

    write_atomic(&paths.scaler, &scaler_bytes)?;
    write_atomic(&paths.model, &model_bytes)?;

    log::info!(
        "Saved model artifacts (run {}) to {} / {}",
        metadata.run_id,
        paths.model.display(),
        paths.scaler.display()
    );
    Ok(fingerprint(&model_bytes))
}

/// Load and validate a pair
pub fn load(paths: &ArtifactPaths) -> Result<ArtifactBundle, ArtifactError> {
    match load_pair(paths) {
        Err(ArtifactError::RunMismatch { .. }) => {
            log::debug!("Artifact run ids differ; re-reading once in case a save was in flight");
            load_pair(paths)
        }
        other => other,
    }
}

fn load_pair(paths: &ArtifactPaths) -> Result<ArtifactBundle, ArtifactError> {
    let model_bytes = read(&paths.model)?;
    let scaler_bytes = read(&paths.scaler)?;

    let model: Envelope<RandomForest> = decode(&paths.model, &model_bytes)?;
    let scaler: Envelope<StandardScaler> = decode(&paths.scaler, &scaler_bytes)?;

    if model.metadata.run_id != scaler.metadata.run_id {
        return Err(ArtifactError::RunMismatch {
            model: model.metadata.run_id,
            scaler: scaler.metadata.run_id,
        });
    }

    validate_layout(model.metadata.feature_version, model.metadata.layout_hash)?;
    validate_layout(scaler.metadata.feature_version, scaler.metadata.layout_hash)?;

    scaler.payload.validate(FEATURE_COUNT)?;
    model.payload.validate(FEATURE_COUNT)?;

    Ok(ArtifactBundle {
        metadata: model.metadata,
        model: model.payload,
        scaler: scaler.payload,
        fingerprint: fingerprint(&model_bytes),
    })
}

/// SHA-256 hex digest
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn encode<T: Serialize>(path: &Path, metadata: &ArtifactMetadata, payload: &T) -> Result<Vec<u8>, ArtifactError> {
    let envelope = Envelope { metadata: metadata.clone(), payload };
    serde_json::to_vec(&envelope).map_err(|source| ArtifactError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn decode<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<Envelope<T>, ArtifactError> {
    serde_json::from_slice(bytes).map_err(|source| ArtifactError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ArtifactError::Missing(path.to_path_buf())),
        Err(source) => Err(ArtifactError::Io { path: path.to_path_buf(), source }),
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ArtifactError> {
    let io_err = |source: std::io::Error| ArtifactError::Io { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".artifact-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
