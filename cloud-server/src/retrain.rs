//! Background retraining
//!
//! Requests are coalesced: at most one training job runs at a time, and any
//! number of requests arriving during a run collapse into exactly one
//! follow-up run. Training itself runs on the blocking pool.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use credlens_core::{ArtifactPaths, BusinessRecord, SharedEngine, TrainerConfig, TrainingError, TrainingReport};
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::models::Business;

#[derive(Debug, Error)]
pub enum RetrainError {
    #[error("loading training records failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Training(#[from] TrainingError),

    #[error("training task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result of the most recent run, for the status endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrainingOutcome {
    Succeeded {
        finished_at: DateTime<Utc>,
        report: TrainingReport,
        engine_swapped: bool,
    },
    Failed {
        finished_at: DateTime<Utc>,
        error: String,
    },
}

/// Read every stored record and run one training pass
pub async fn train_from_store(
    pool: &SqlitePool,
    trainer: TrainerConfig,
    paths: ArtifactPaths,
) -> Result<TrainingReport, RetrainError> {
    let records: Vec<BusinessRecord> = Business::list_all(pool)
        .await?
        .into_iter()
        .map(BusinessRecord::from)
        .collect();

    let report = tokio::task::spawn_blocking(move || {
        credlens_core::logic::trainer::train(&records, &trainer, &paths)
    })
    .await??;

    Ok(report)
}

#[derive(Clone)]
pub struct RetrainScheduler {
    inner: Arc<Inner>,
}

struct Inner {
    pool: SqlitePool,
    config: Config,
    trainer: TrainerConfig,
    engine: SharedEngine,
    running: AtomicBool,
    pending: AtomicBool,
    last: RwLock<Option<TrainingOutcome>>,
    #[cfg(test)]
    runs: std::sync::atomic::AtomicUsize,
}

impl RetrainScheduler {
    pub fn new(pool: SqlitePool, config: Config, trainer: TrainerConfig, engine: SharedEngine) -> Self {
        Self {
            inner: Arc::new(Inner {
                pool,
                config,
                trainer,
                engine,
                running: AtomicBool::new(false),
                pending: AtomicBool::new(false),
                last: RwLock::new(None),
                #[cfg(test)]
                runs: std::sync::atomic::AtomicUsize::new(0),
            }),
        }
    }

    /// Ask for a retrain. Returns `true` if a new job was started, `false`
    /// if the request was folded into the running one.
    pub fn request(&self) -> bool {
        self.inner.pending.store(true, Ordering::SeqCst);

        if self
            .inner
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Retrain already running; request coalesced");
            return false;
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.run_loop().await });
        true
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    pub async fn last_outcome(&self) -> Option<TrainingOutcome> {
        self.inner.last.read().await.clone()
    }
}

impl Inner {
    async fn run_loop(&self) {
        loop {
            while self.pending.swap(false, Ordering::SeqCst) {
                self.run_once().await;
            }

            self.running.store(false, Ordering::SeqCst);

            // A request may have set `pending` after the last swap but seen
            // `running` still true; pick it up here.
            if !self.pending.load(Ordering::SeqCst)
                || self
                    .running
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_err()
            {
                return;
            }
        }
    }

    async fn run_once(&self) {
        #[cfg(test)]
        self.runs.fetch_add(1, Ordering::SeqCst);
        tracing::info!("Retraining model from stored records");

        let outcome = match train_from_store(&self.pool, self.trainer.clone(), self.config.artifact_paths()).await {
            Ok(report) => {
                let engine_swapped = self.reload_engine().await;
                tracing::info!(
                    run_id = %report.run_id,
                    records = report.dataset.labeled,
                    accuracy = report.metrics.accuracy,
                    engine_swapped,
                    "Retrain finished"
                );
                TrainingOutcome::Succeeded {
                    finished_at: Utc::now(),
                    report,
                    engine_swapped,
                }
            }
            Err(e) => {
                tracing::warn!("Retrain failed: {}", e);
                TrainingOutcome::Failed {
                    finished_at: Utc::now(),
                    error: e.to_string(),
                }
            }
        };

        *self.last.write().await = Some(outcome);
    }

    /// Artifact decoding runs on the blocking pool
    async fn reload_engine(&self) -> bool {
        let engine = self.engine.clone();
        let config = self.config.engine_config();
        match tokio::task::spawn_blocking(move || engine.reload(config)).await {
            Ok(swapped) => swapped,
            Err(e) => {
                tracing::error!("Engine reload task aborted: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
impl RetrainScheduler {
    /// Wait until no job is running (tests only)
    pub async fn wait_idle(&self) {
        while self.is_running() {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}
