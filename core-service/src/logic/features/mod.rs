//! Features Module - Feature Engineering
//!
//! Turns a raw analysis request into the ordered feature vector the
//! classifier was trained on.
//!
//! - `input`: lenient request payload (`AnalysisInput`)
//! - `layout`: authoritative feature order + layout hash
//! - `vector`: `FeatureVector` built from requests or stored records

pub mod input;
pub mod layout;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use input::AnalysisInput;
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LayoutInfo, LayoutMismatchError};
pub use vector::{engineer_features, FeatureVector};
