//! Shared, hot-swappable engine handle
//!
//! Handlers call `current()` once per request and keep that snapshot; a
//! retrain that finishes mid-request swaps the holder without affecting it.

use std::sync::Arc;

use parking_lot::RwLock;

use super::{EngineConfig, RiskEngine};

#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<Arc<RiskEngine>>>,
}

impl SharedEngine {
    pub fn new(engine: RiskEngine) -> Self {
        Self { inner: Arc::new(RwLock::new(Arc::new(engine))) }
    }

    pub fn current(&self) -> Arc<RiskEngine> {
        Arc::clone(&self.inner.read())
    }

    /// Replace the engine; returns the previous one
    pub fn swap(&self, engine: RiskEngine) -> Arc<RiskEngine> {
        std::mem::replace(&mut *self.inner.write(), Arc::new(engine))
    }

    /// Rebuild from artifacts on disk. Swaps only when the new engine has a
    /// model, so a bad artifact never replaces a working one.
    pub fn reload(&self, config: EngineConfig) -> bool {
        let engine = RiskEngine::load(config);
        if !engine.model_loaded() {
            log::warn!("Reload produced no model; keeping current engine");
            return false;
        }
        self.swap(engine);
        log::info!("Risk engine swapped to freshly loaded model");
        true
    }
}
