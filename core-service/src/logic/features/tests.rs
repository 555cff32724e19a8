//! Feature Engineering Tests
//!
//! Request payloads must land in the exact order the classifier was trained on.

use super::{engineer_features, AnalysisInput, FeatureVector, FEATURE_LAYOUT, FEATURE_VERSION};

#[test]
fn test_engineer_orders_fields_like_training_columns() {
    let input = AnalysisInput {
        revenue: 120_000.0,
        payment_delay: 5.0,
        transactions: 500,
        sentiment: 0.8,
        activity_freq: 99,
    };

    let vector = engineer_features(&input);

    assert_eq!(vector.values, [120_000.0, 5.0, 500.0, 0.8]);
    assert_eq!(vector.monthly_revenue(), 120_000.0);
    assert_eq!(vector.payment_delays(), 5.0);
    assert_eq!(vector.transactions(), 500.0);
    assert_eq!(vector.avg_sentiment(), 0.8);
}

#[test]
fn test_activity_freq_is_not_a_feature() {
    let base = AnalysisInput { revenue: 1.0, ..Default::default() };
    let busy = AnalysisInput { activity_freq: 1_000, ..base.clone() };

    assert_eq!(engineer_features(&base), engineer_features(&busy));
}

#[test]
fn test_empty_input_is_all_zero() {
    let vector = engineer_features(&AnalysisInput::default());
    assert_eq!(vector.values, [0.0; 4]);
    assert_eq!(vector.version, FEATURE_VERSION);
}

#[test]
fn test_out_of_range_values_pass_through() {
    let input = AnalysisInput {
        revenue: -5.0,
        payment_delay: -1.0,
        transactions: -3,
        sentiment: 4.0,
        activity_freq: 0,
    };

    let vector = FeatureVector::from_input(&input);
    assert_eq!(vector.values, [-5.0, -1.0, -3.0, 4.0]);
}

#[test]
fn test_log_entry_names_every_feature() {
    let vector = FeatureVector::from_values([1.0, 2.0, 3.0, 0.5]);
    let entry = vector.to_log_entry();

    for name in FEATURE_LAYOUT {
        assert!(entry["named_values"].get(*name).is_some(), "missing {}", name);
    }
}
