//! Risk Classifier
//!
//! Pure function of the ML probability. The deterministic score is accepted
//! so callers pass everything the decision could depend on, but the current
//! policy ignores it: only the probability selects the band.

use super::rules::RiskThresholds;
use super::types::RiskLevel;

/// Classify with default thresholds
pub fn classify(probability: f64, score: u8) -> RiskLevel {
    classify_with_thresholds(probability, score, &RiskThresholds::default())
}

/// Classification with custom thresholds
pub fn classify_with_thresholds(probability: f64, _score: u8, thresholds: &RiskThresholds) -> RiskLevel {
    if probability > thresholds.high_above {
        RiskLevel::High
    } else if probability > thresholds.moderate_above {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_boundaries() {
        assert_eq!(classify(0.71, 50), RiskLevel::High);
        assert_eq!(classify(0.70, 50), RiskLevel::Moderate);
        assert_eq!(classify(0.41, 50), RiskLevel::Moderate);
        assert_eq!(classify(0.40, 50), RiskLevel::Low);
        assert_eq!(classify(0.0, 50), RiskLevel::Low);
        assert_eq!(classify(1.0, 50), RiskLevel::High);
    }

    #[test]
    fn test_fallback_probability_is_moderate() {
        assert_eq!(classify(crate::constants::FALLBACK_PROBABILITY, 0), RiskLevel::Moderate);
    }

    /// The deterministic score does not move the label, even at its extremes.
    #[test]
    fn test_score_does_not_influence_risk() {
        for probability in [0.1, 0.5, 0.9] {
            assert_eq!(classify(probability, 0), classify(probability, 100));
        }
        assert_eq!(classify(0.9, 100), RiskLevel::High);
        assert_eq!(classify(0.1, 0), RiskLevel::Low);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = RiskThresholds { high_above: 0.5, moderate_above: 0.2 };
        assert_eq!(classify_with_thresholds(0.6, 90, &strict), RiskLevel::High);
        assert_eq!(classify_with_thresholds(0.3, 90, &strict), RiskLevel::Moderate);
        assert_eq!(classify_with_thresholds(0.2, 90, &strict), RiskLevel::Low);
    }

    #[test]
    fn test_label_mapping() {
        assert_eq!(RiskLevel::High.as_label(), 1);
        assert_eq!(RiskLevel::Moderate.as_label(), 0);
        assert_eq!(RiskLevel::Low.as_label(), 0);
        assert_eq!(serde_json::to_string(&RiskLevel::Moderate).unwrap(), "\"Moderate\"");
    }
}
