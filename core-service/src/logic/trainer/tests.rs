//! Trainer Tests

use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;

use super::*;
use crate::logic::features::FeatureVector;
use crate::logic::model::{PredictionMethod, Predictor};

fn small_config() -> TrainerConfig {
    TrainerConfig {
        forest: ForestParams { n_trees: 15, ..Default::default() },
        ..Default::default()
    }
}

/// Late payers with thin revenue are labeled high risk
fn synthetic_records(n: usize) -> Vec<BusinessRecord> {
    let created_at = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    (0..n)
        .map(|i| {
            let risky = i % 2 == 0;
            let jitter = (i % 7) as f64;
            BusinessRecord {
                id: i as i64 + 1,
                monthly_revenue: if risky { 8_000.0 + jitter * 500.0 } else { 90_000.0 + jitter * 2_000.0 },
                payment_delays: if risky { 45.0 + jitter } else { 2.0 + jitter / 2.0 },
                transactions: if risky { 20 + i as i64 % 5 } else { 400 + i as i64 % 50 },
                avg_sentiment: if risky { -0.5 } else { 0.6 },
                risk_label: Some(i64::from(risky)),
                created_at,
            }
        })
        .collect()
}

#[test]
fn test_train_then_load_round_trip() {
    let dir = tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    let report = train(&synthetic_records(40), &small_config(), &paths).unwrap();

    assert_eq!(report.dataset.labeled, 40);
    assert_eq!(report.train_size, 32);
    assert_eq!(report.test_size, 8);
    assert_eq!(report.metrics.samples(), 8);
    assert!(report.metrics.accuracy >= 0.75);
    assert_eq!(report.fingerprint.len(), 64);

    let predictor = Predictor::load(&paths);
    assert!(predictor.is_loaded());

    let risky = predictor.predict(&FeatureVector::from_values([9_000.0, 48.0, 22.0, -0.5]));
    let healthy = predictor.predict(&FeatureVector::from_values([95_000.0, 3.0, 420.0, 0.6]));

    assert_eq!(risky.method, PredictionMethod::Model);
    assert!((0.0..=1.0).contains(&risky.probability));
    assert!((0.0..=1.0).contains(&healthy.probability));
    assert!(risky.probability > healthy.probability);

    if let Predictor::Loaded(loaded) = &predictor {
        assert_eq!(loaded.info().run_id, Some(report.run_id));
        assert_eq!(loaded.info().fingerprint.as_deref(), Some(report.fingerprint.as_str()));
    }
}

#[test]
fn test_unlabeled_rows_are_ignored() {
    let dir = tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    let mut records = synthetic_records(20);
    for r in records.iter_mut().take(5) {
        r.risk_label = None;
    }

    let report = train(&records, &small_config(), &paths).unwrap();
    assert_eq!(report.dataset.total_records, 20);
    assert_eq!(report.dataset.unlabeled, 5);
    assert_eq!(report.dataset.labeled, 15);
}

#[test]
fn test_too_few_records_writes_nothing() {
    let dir = tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    let err = train(&synthetic_records(9), &small_config(), &paths).unwrap_err();

    assert!(matches!(err, TrainingError::NotEnoughRecords { required: 10, available: 9 }));
    assert!(!paths.model.exists());
    assert!(!paths.scaler.exists());
}

#[test]
fn test_single_class_refused() {
    let dir = tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    let mut records = synthetic_records(20);
    for r in &mut records {
        r.risk_label = Some(0);
    }

    let err = train(&records, &small_config(), &paths).unwrap_err();
    assert!(matches!(err, TrainingError::SingleClass { positives: 0, negatives: 20 }));
    assert!(!paths.model.exists());
}

#[test]
fn test_failed_run_keeps_previous_artifacts() {
    let dir = tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    train(&synthetic_records(30), &small_config(), &paths).unwrap();
    let model_before = fs::read(&paths.model).unwrap();
    let scaler_before = fs::read(&paths.scaler).unwrap();

    assert!(train(&synthetic_records(4), &small_config(), &paths).is_err());

    assert_eq!(fs::read(&paths.model).unwrap(), model_before);
    assert_eq!(fs::read(&paths.scaler).unwrap(), scaler_before);
}

#[test]
fn test_fit_is_deterministic_for_a_seed() {
    let set = TrainingSet::from_records(&synthetic_records(30));

    let a = fit(&set, &small_config()).unwrap();
    let b = fit(&set, &small_config()).unwrap();

    assert_eq!(a.model, b.model);
    assert_eq!(a.scaler, b.scaler);
    assert_eq!(a.metrics, b.metrics);
}
