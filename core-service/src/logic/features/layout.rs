//! Feature Layout
//!
//! The one place the feature order is declared. Reordering, adding or
//! removing a feature bumps `FEATURE_VERSION`.
//!
//! Model artifacts record the version and hash they were trained with; an
//! artifact whose layout differs from the running one is refused at load time.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector.
/// Names match the `businesses` table columns.
pub const FEATURE_LAYOUT: &[&str] = &[
    "monthly_revenue",  // 0: request `revenue`
    "payment_delays",   // 1: request `paymentDelay` (days)
    "transactions",     // 2: request `transactions` (integer count)
    "avg_sentiment",    // 3: request `sentiment` in [-1, 1]
];

/// Total number of features (= `FEATURE_LAYOUT.len()`, checked in tests)
pub const FEATURE_COUNT: usize = 4;

// Index constants for readable access
pub const IDX_REVENUE: usize = 0;
pub const IDX_PAYMENT_DELAYS: usize = 1;
pub const IDX_TRANSACTIONS: usize = 2;
pub const IDX_SENTIMENT: usize = 3;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over the version byte and the NUL-separated feature names
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Artifact or vector built against a different feature layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("feature layout mismatch: expected v{expected_version} ({expected_hash:08x}), got v{actual_version} ({actual_hash:08x})")]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Check a recorded (version, hash) pair against the running layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 4);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_layout() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());

        let err = validate_layout(FEATURE_VERSION + 1, layout_hash()).unwrap_err();
        assert_eq!(err.expected_version, FEATURE_VERSION);
        assert_eq!(err.actual_version, FEATURE_VERSION + 1);

        assert!(validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1)).is_err());
    }

    #[test]
    fn test_index_constants_match_training_order() {
        assert_eq!(FEATURE_LAYOUT[IDX_REVENUE], "monthly_revenue");
        assert_eq!(FEATURE_LAYOUT[IDX_PAYMENT_DELAYS], "payment_delays");
        assert_eq!(FEATURE_LAYOUT[IDX_TRANSACTIONS], "transactions");
        assert_eq!(FEATURE_LAYOUT[IDX_SENTIMENT], "avg_sentiment");
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}
