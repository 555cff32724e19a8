//! Risk Engine Tests

use std::sync::Arc;

use super::*;
use crate::logic::model::{ModelError, RiskModel, StandardScaler};

struct FixedModel(f64);

impl RiskModel for FixedModel {
    fn predict_proba(&self, _features: &[f64]) -> Result<f64, ModelError> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn mock_engine(probability: f64) -> RiskEngine {
    let scaler = StandardScaler { mean: vec![0.0; 4], scale: vec![1.0; 4] };
    RiskEngine::with_predictor(
        EngineConfig::default(),
        Predictor::with_model(Arc::new(FixedModel(probability)), scaler),
    )
}

fn degraded_engine() -> RiskEngine {
    RiskEngine::with_predictor(EngineConfig::default(), Predictor::unavailable("no artifacts"))
}

fn reference_input() -> AnalysisInput {
    AnalysisInput {
        revenue: 120_000.0,
        payment_delay: 5.0,
        transactions: 500,
        sentiment: 0.8,
        activity_freq: 0,
    }
}

#[test]
fn test_end_to_end_with_mock_model() {
    let result = mock_engine(0.123).analyze(&reference_input());

    assert_eq!(result.factors.financial_stability, 84);
    assert_eq!(result.factors.behavioral, 90);
    assert_eq!(result.factors.sentiment, 90);
    assert_eq!(result.factors.activity, 83);
    assert_eq!(result.score, 87);
    assert_eq!(result.grade, Grade::A);
    assert_eq!(result.ml_risk_probability, 0.12);
    assert_eq!(result.risk, RiskLevel::Low);
}

#[test]
fn test_result_json_shape() {
    let result = mock_engine(0.9).analyze(&reference_input());
    let json = serde_json::to_value(result).unwrap();

    assert_eq!(json["score"], 87);
    assert_eq!(json["grade"], "A");
    assert_eq!(json["risk"], "High");
    assert_eq!(json["ml_risk_probability"], 0.9);
    assert_eq!(json["factors"]["financialStability"], 84);
}

#[test]
fn test_degraded_mode_is_moderate_for_every_input() {
    let engine = degraded_engine();
    assert!(!engine.model_loaded());

    let inputs = [
        AnalysisInput::default(),
        reference_input(),
        AnalysisInput { revenue: 1.0, payment_delay: 300.0, sentiment: -1.0, ..Default::default() },
    ];

    for input in &inputs {
        let result = engine.analyze(input);
        assert_eq!(result.ml_risk_probability, 0.5);
        assert_eq!(result.risk, RiskLevel::Moderate);
    }

    let status = engine.status();
    assert_eq!(status.predictions, 3);
    assert_eq!(status.fallbacks, 3);
    assert!(!status.model.loaded);
    assert_eq!(status.model.engine, "fallback");
    assert_eq!(status.model.unavailable_reason.as_deref(), Some("no artifacts"));
}

#[test]
fn test_analyze_is_idempotent() {
    let engine = mock_engine(0.456);
    let input = reference_input();

    let first = serde_json::to_vec(&engine.analyze(&input)).unwrap();
    let second = serde_json::to_vec(&engine.analyze(&input)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_probability_rounded_to_two_decimals() {
    assert_eq!(mock_engine(0.706).analyze(&reference_input()).ml_risk_probability, 0.71);
    assert_eq!(mock_engine(0.3333).analyze(&reference_input()).ml_risk_probability, 0.33);
}

#[test]
fn test_risk_uses_unrounded_probability() {
    // 0.7004 rounds to 0.70 for display but is still above the High threshold
    let result = mock_engine(0.7004).analyze(&reference_input());
    assert_eq!(result.ml_risk_probability, 0.7);
    assert_eq!(result.risk, RiskLevel::High);
}

#[test]
fn test_missing_artifacts_load_degraded() {
    let dir = tempfile::tempdir().unwrap();
    let engine = RiskEngine::load(EngineConfig::with_artifacts(ArtifactPaths::in_dir(dir.path())));

    assert!(!engine.model_loaded());
    assert_eq!(engine.analyze(&reference_input()).risk, RiskLevel::Moderate);
}

#[test]
fn test_status_reports_layout_and_model() {
    let engine = mock_engine(0.2);
    engine.analyze(&reference_input());

    let status = engine.status();
    assert_eq!(status.feature_count, 4);
    assert_eq!(status.feature_names[0], "monthly_revenue");
    assert!(status.model.loaded);
    assert_eq!(status.model.engine, "fixed");
    assert_eq!(status.predictions, 1);
    assert_eq!(status.fallbacks, 0);
}

#[test]
fn test_shared_engine_swap_visibility() {
    let shared = SharedEngine::new(degraded_engine());
    let snapshot = shared.current();

    let previous = shared.swap(mock_engine(0.9));

    assert!(!previous.model_loaded());
    assert!(!snapshot.model_loaded());
    assert!(shared.current().model_loaded());
    assert_eq!(shared.current().analyze(&reference_input()).risk, RiskLevel::High);
    // In-flight snapshot keeps answering from the old engine
    assert_eq!(snapshot.analyze(&reference_input()).risk, RiskLevel::Moderate);
}

#[test]
fn test_shared_engine_reload_keeps_working_model() {
    let dir = tempfile::tempdir().unwrap();
    let shared = SharedEngine::new(mock_engine(0.1));

    let swapped = shared.reload(EngineConfig::with_artifacts(ArtifactPaths::in_dir(dir.path())));

    assert!(!swapped);
    assert!(shared.current().model_loaded());
}
