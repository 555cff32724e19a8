//! Logic Module - Scoring, prediction and training
//!
//! - `features/` - request → ordered feature vector
//! - `scoring/` - deterministic rule-based score and grade
//! - `model/` - scaler, random forest, predictor, artifacts
//! - `risk/` - probability → risk level
//! - `engine/` - the composed `analyze` call + hot-swappable holder
//! - `dataset/` - store rows → training matrix
//! - `trainer/` - fit, evaluate, persist

pub mod dataset;
pub mod engine;
pub mod features;
pub mod model;
pub mod risk;
pub mod scoring;
pub mod trainer;
