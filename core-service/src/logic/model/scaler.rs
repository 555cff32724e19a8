//! Standard Scaler
//!
//! Per-feature `(x - mean) / std` with population std. A constant feature
//! (std = 0) keeps scale 1 so it maps to 0 instead of dividing by zero.

use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::ModelError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit on training rows (samples × features)
    pub fn fit(x: ArrayView2<'_, f64>) -> Result<Self, ModelError> {
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(ModelError::EmptyInput);
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite("scaler training data"));
        }

        let mean = x.mean_axis(Axis(0)).ok_or(ModelError::EmptyInput)?;
        let std = x.std_axis(Axis(0), 0.0);

        Ok(Self {
            mean: mean.to_vec(),
            scale: std
                .iter()
                .map(|&s| if s > 0.0 && s.is_finite() { s } else { 1.0 })
                .collect(),
        })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Scale a single feature row
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        if row.len() != self.n_features() {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features(),
                actual: row.len(),
            });
        }

        let scaled: Vec<f64> = row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect();

        if scaled.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite("scaled features"));
        }
        Ok(scaled)
    }

    /// Scale a whole matrix
    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        if x.ncols() != self.n_features() {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features(),
                actual: x.ncols(),
            });
        }

        let mut scaled = x.to_owned();
        for mut row in scaled.rows_mut() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = (*v - self.mean[j]) / self.scale[j];
            }
        }
        Ok(scaled)
    }

    /// Structural check for scalers read from disk
    pub fn validate(&self, expected_features: usize) -> Result<(), ModelError> {
        if self.mean.len() != expected_features || self.scale.len() != expected_features {
            return Err(ModelError::DimensionMismatch {
                expected: expected_features,
                actual: self.mean.len().max(self.scale.len()),
            });
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err(ModelError::NonFinite("scaler mean"));
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ModelError::Corrupt("scaler scale must be finite and positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fit_and_transform() {
        let x = array![[1.0, 10.0], [3.0, 10.0]];
        let scaler = StandardScaler::fit(x.view()).unwrap();

        assert_eq!(scaler.mean, vec![2.0, 10.0]);
        // Constant column keeps unit scale
        assert_eq!(scaler.scale, vec![1.0, 1.0]);

        let scaled = scaler.transform(x.view()).unwrap();
        assert_eq!(scaled, array![[-1.0, 0.0], [1.0, 0.0]]);
        assert_eq!(scaler.transform_row(&[3.0, 12.0]).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let scaler = StandardScaler { mean: vec![0.0; 4], scale: vec![1.0; 4] };
        assert!(matches!(
            scaler.transform_row(&[1.0, 2.0]),
            Err(ModelError::DimensionMismatch { expected: 4, actual: 2 })
        ));
    }

    #[test]
    fn test_rejects_empty_and_non_finite() {
        let empty = Array2::<f64>::zeros((0, 4));
        assert_eq!(StandardScaler::fit(empty.view()), Err(ModelError::EmptyInput));

        let bad = array![[1.0, f64::NAN]];
        assert!(StandardScaler::fit(bad.view()).is_err());
    }

    #[test]
    fn test_validate() {
        let good = StandardScaler { mean: vec![0.0; 4], scale: vec![1.0; 4] };
        assert!(good.validate(4).is_ok());
        assert!(good.validate(3).is_err());

        let zero_scale = StandardScaler { mean: vec![0.0; 4], scale: vec![0.0; 4] };
        assert!(zero_scale.validate(4).is_err());
    }
}
