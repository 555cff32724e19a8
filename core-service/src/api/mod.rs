//! API Module
//!
//! Serializable views of engine state for outer surfaces (HTTP status route,
//! offline tooling).

pub mod engine_status;

pub use engine_status::{EngineStatus, ModelStatus};
