//! Risk Module
//!
//! Turns the classifier's high-risk probability into a three-level label.
//!
//! ## Structure
//! - `types`: `RiskLevel`
//! - `rules`: probability thresholds
//! - `classifier`: classification logic

pub mod classifier;
pub mod rules;
pub mod types;

pub use classifier::{classify, classify_with_thresholds};
pub use rules::{RiskThresholds, HIGH_RISK_THRESHOLD, MODERATE_RISK_THRESHOLD};
pub use types::RiskLevel;
