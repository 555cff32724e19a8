//! CredLens Core - Reputation Scoring Engine
//!
//! Scores small businesses from a handful of numeric signals by blending a
//! deterministic weighted-rule score with the probability of a trained
//! classifier.
//!
//! # Architecture
//!
//! ```text
//! AnalysisInput
//!      │
//!      ▼
//! ┌──────────────┐     ┌──────────────────────┐
//! │   features   │────▶│ scoring (rule-based) │──┐
//! └──────┬───────┘     └──────────────────────┘  │
//!        │             ┌──────────────────────┐  │   ┌──────────┐
//!        └────────────▶│ model (forest+scaler)│──┼──▶│   risk   │──▶ AnalysisResult
//!                      └──────────▲───────────┘  │   └──────────┘
//!                                 │ artifacts    │
//!                      ┌──────────┴───────────┐  │
//!                      │ trainer ◀── dataset  │  │
//!                      └──────────────────────┘
//! ```

pub mod api;
pub mod constants;
pub mod logic;

pub use api::engine_status::{EngineStatus, ModelStatus};
pub use logic::dataset::{BusinessRecord, NewBusinessRecord};
pub use logic::engine::{AnalysisResult, EngineConfig, RiskEngine, SharedEngine};
pub use logic::features::AnalysisInput;
pub use logic::model::ArtifactPaths;
pub use logic::trainer::{TrainerConfig, TrainingError, TrainingReport};
