//! Held-out evaluation metrics (positive class = high risk)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl EvaluationMetrics {
    pub fn samples(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }
}

/// Compare predicted labels against actual ones. Undefined ratios are 0.
pub fn evaluate(predicted: &[u8], actual: &[u8]) -> EvaluationMetrics {
    let mut m = EvaluationMetrics::default();

    for (&p, &a) in predicted.iter().zip(actual) {
        match (p == 1, a == 1) {
            (true, true) => m.true_positives += 1,
            (true, false) => m.false_positives += 1,
            (false, false) => m.true_negatives += 1,
            (false, true) => m.false_negatives += 1,
        }
    }

    let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };

    m.accuracy = ratio(m.true_positives + m.true_negatives, m.samples());
    m.precision = ratio(m.true_positives, m.true_positives + m.false_positives);
    m.recall = ratio(m.true_positives, m.true_positives + m.false_negatives);
    m.f1 = if m.precision + m.recall > 0.0 {
        2.0 * m.precision * m.recall / (m.precision + m.recall)
    } else {
        0.0
    };
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusion_counts() {
        let m = evaluate(&[1, 1, 0, 0, 1], &[1, 0, 0, 1, 1]);

        assert_eq!(m.true_positives, 2);
        assert_eq!(m.false_positives, 1);
        assert_eq!(m.true_negatives, 1);
        assert_eq!(m.false_negatives, 1);
        assert_eq!(m.samples(), 5);
        assert!((m.accuracy - 0.6).abs() < 1e-12);
        assert!((m.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.f1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_positive_predictions() {
        let m = evaluate(&[0, 0], &[0, 1]);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);
        assert_eq!(m.accuracy, 0.5);
    }

    #[test]
    fn test_empty() {
        assert_eq!(evaluate(&[], &[]), EvaluationMetrics::default());
    }
}
