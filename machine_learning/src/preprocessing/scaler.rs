use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::{MlErr, Result};

/// Standardizes columns by removing their mean and scaling them to unit variance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Returns a new, unfitted, `StandardScaler`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Learns the mean and the population standard deviation of every column of `x`.
    ///
    /// Constant columns get a scale of one so they're only centered.
    pub fn fit(&mut self, x: ArrayView2<f64>) -> Result<()> {
        let mean = x
            .mean_axis(Axis(0))
            .ok_or(MlErr::EmptyDataset { what: "scaler input" })?;
        let std = x.std_axis(Axis(0), 0.0);

        self.scale = std
            .iter()
            .zip(&mean)
            .map(|(&s, &m)| {
                if s <= 10.0 * f64::EPSILON * m.abs().max(1.0) {
                    1.0
                } else {
                    s
                }
            })
            .collect();
        self.mean = mean.to_vec();

        Ok(())
    }

    /// Standardizes `x` with the learnt statistics.
    pub fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        if self.mean.is_empty() {
            return Err(MlErr::NotFitted {
                estimator: "StandardScaler",
            });
        }

        if x.ncols() != self.mean.len() {
            return Err(MlErr::SizeMismatch {
                what: "scaler columns",
                got: x.ncols(),
                expected: self.mean.len(),
            });
        }

        let mut out = x.to_owned();
        let stats = self.mean.iter().zip(&self.scale);
        for (mut column, (m, s)) in out.columns_mut().into_iter().zip(stats) {
            column.mapv_inplace(|v| (v - m) / s);
        }

        Ok(out)
    }

    /// The learnt per-column means.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// The learnt per-column scales.
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn standardizes_columns() {
        let x = array![[1.0, 10.0], [3.0, 10.0], [5.0, 10.0]];
        let mut scaler = StandardScaler::new();
        scaler.fit(x.view()).unwrap();

        assert_eq!(scaler.mean(), &[3.0, 10.0]);
        assert!((scaler.scale()[0] - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(scaler.scale()[1], 1.0);

        let z = scaler.transform(x.view()).unwrap();
        assert!(z.column(0).sum().abs() < 1e-12);
        assert!(z.column(1).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn unfitted_transform_fails() {
        let x = array![[1.0]];
        assert!(matches!(
            StandardScaler::new().transform(x.view()),
            Err(MlErr::NotFitted { .. })
        ));
    }

    #[test]
    fn column_count_must_match() {
        let mut scaler = StandardScaler::new();
        scaler.fit(array![[1.0, 2.0], [2.0, 3.0]].view()).unwrap();

        assert!(matches!(
            scaler.transform(array![[1.0]].view()),
            Err(MlErr::SizeMismatch { got: 1, expected: 2, .. })
        ));
    }
}
