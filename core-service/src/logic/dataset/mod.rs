//! Dataset Module - Training data from the business store
//!
//! The store is ground truth: every labeled row becomes one training
//! example. Rows without a usable 0/1 label are counted and skipped.

pub mod record;

#[cfg(test)]
mod tests;

pub use record::{BusinessRecord, NewBusinessRecord};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::logic::features::FEATURE_COUNT;

/// How the store's rows were used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub labeled: usize,
    pub unlabeled: usize,
    pub invalid_label: usize,
    pub positives: usize,
    pub negatives: usize,
}

/// Feature matrix + labels ready for fitting
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    pub features: Array2<f64>,
    pub labels: Vec<u8>,
    pub summary: DatasetSummary,
}

impl TrainingSet {
    pub fn from_records(records: &[BusinessRecord]) -> Self {
        let mut summary = DatasetSummary { total_records: records.len(), ..Default::default() };
        let mut values = Vec::with_capacity(records.len() * FEATURE_COUNT);
        let mut labels = Vec::with_capacity(records.len());

        for record in records {
            match (record.risk_label, record.label()) {
                (None, _) => summary.unlabeled += 1,
                (Some(_), None) => {
                    log::debug!("Skipping record {} with label {:?}", record.id, record.risk_label);
                    summary.invalid_label += 1;
                }
                (Some(_), Some(label)) => {
                    values.extend_from_slice(record.features().as_slice());
                    labels.push(label);
                }
            }
        }

        summary.labeled = labels.len();
        summary.positives = labels.iter().filter(|&&l| l == 1).count();
        summary.negatives = summary.labeled - summary.positives;

        // rows * FEATURE_COUNT values by construction
        let features = Array2::from_shape_vec((labels.len(), FEATURE_COUNT), values)
            .unwrap_or_else(|_| Array2::zeros((0, FEATURE_COUNT)));

        Self { features, labels, summary }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn has_both_classes(&self) -> bool {
        self.summary.positives > 0 && self.summary.negatives > 0
    }
}
