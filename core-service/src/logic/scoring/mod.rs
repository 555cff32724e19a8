//! Scoring Module - Deterministic Scorer
//!
//! Rule-based 0-100 credit score with no learned parameters.
//!
//! ## Structure
//! - `rules`: caps, weights, grade thresholds, `ScoringCalibration`
//! - `factors`: the four sub-scores and the weighted overall score
//! - `grade`: A/B/C/D mapping
//!
//! ```text
//! overall = round(0.3·financial + 0.3·behavioral + 0.2·sentiment + 0.2·activity)
//! ```

pub mod factors;
pub mod grade;
pub mod rules;


pub use factors::FactorScores;
pub use grade::Grade;
pub use rules::ScoringCalibration;

use crate::logic::features::FeatureVector;

/// Output of the deterministic scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicScore {
    pub score: u8,
    pub grade: Grade,
    pub factors: FactorScores,
}

/// Compute the four factors for a feature vector
pub fn factor_scores(vector: &FeatureVector, calibration: &ScoringCalibration) -> FactorScores {
    let revenue = vector.monthly_revenue();
    let payment_delay = vector.payment_delays();
    let transactions = vector.transactions();

    FactorScores {
        financial_stability: calibration.financial_stability(revenue, payment_delay),
        sentiment: calibration.sentiment(vector.avg_sentiment()),
        behavioral: calibration.behavioral(payment_delay, transactions),
        activity: calibration.activity(transactions),
    }
}

/// Score a feature vector: factors → overall score → grade
pub fn score(vector: &FeatureVector, calibration: &ScoringCalibration) -> DeterministicScore {
    let factors = factor_scores(vector, calibration);
    let score = calibration.overall(&factors);

    DeterministicScore {
        score,
        grade: Grade::from_score(score),
        factors,
    }
}
