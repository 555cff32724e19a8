use chrono::NaiveDate;

use super::*;
use crate::logic::features::AnalysisInput;
use crate::logic::risk::RiskLevel;

fn record(id: i64, revenue: f64, label: Option<i64>) -> BusinessRecord {
    BusinessRecord {
        id,
        monthly_revenue: revenue,
        payment_delays: 3.0,
        transactions: 40,
        avg_sentiment: 0.25,
        risk_label: label,
        created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    }
}

#[test]
fn test_record_features_follow_layout() {
    let vector = record(1, 9_000.0, Some(0)).features();
    assert_eq!(vector.values, [9_000.0, 3.0, 40.0, 0.25]);
}

#[test]
fn test_training_set_skips_unusable_labels() {
    let records = vec![
        record(1, 1.0, Some(0)),
        record(2, 2.0, None),
        record(3, 3.0, Some(1)),
        record(4, 4.0, Some(7)),
        record(5, 5.0, Some(1)),
    ];

    let set = TrainingSet::from_records(&records);

    assert_eq!(set.len(), 3);
    assert_eq!(set.labels, vec![0, 1, 1]);
    assert_eq!(set.features.nrows(), 3);
    assert_eq!(set.features[[1, 0]], 3.0);
    assert_eq!(
        set.summary,
        DatasetSummary {
            total_records: 5,
            labeled: 3,
            unlabeled: 1,
            invalid_label: 1,
            positives: 2,
            negatives: 1,
        }
    );
    assert!(set.has_both_classes());
}

#[test]
fn test_empty_store() {
    let set = TrainingSet::from_records(&[]);
    assert!(set.is_empty());
    assert_eq!(set.features.dim(), (0, 4));
    assert!(!set.has_both_classes());
}

#[test]
fn test_new_record_from_analysis() {
    let input = AnalysisInput {
        revenue: 50_000.0,
        payment_delay: 12.0,
        transactions: 80,
        sentiment: -0.4,
        activity_freq: 3,
    };

    let high = NewBusinessRecord::from_analysis(&input, RiskLevel::High);
    assert_eq!(high.risk_label, Some(1));
    assert_eq!(high.avg_sentiment, -0.4);
    assert_eq!(high.transactions, 80);

    assert_eq!(NewBusinessRecord::from_analysis(&input, RiskLevel::Moderate).risk_label, Some(0));
    assert_eq!(NewBusinessRecord::from_analysis(&input, RiskLevel::Low).risk_label, Some(0));
}
