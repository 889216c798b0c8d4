use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::{SeedableRng, rngs::StdRng, seq::index};
use serde::{Deserialize, Serialize};

use super::{
    RegressionTree, Regressor,
    regressor::{check_fit_input, check_predict_input},
};
use crate::{MlErr, Result};

/// Least squares gradient boosting.
///
/// Starts from the mean of the targets and adds, at each stage, a shallow regression tree
/// fitted to the current residuals and shrunk by the learning rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoosting {
    n_estimators: usize,
    learning_rate: f64,
    max_depth: usize,
    subsample: f64,
    seed: u64,
    init: f64,
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl GradientBoosting {
    /// Creates a new, unfitted, `GradientBoosting` regressor.
    ///
    /// # Arguments
    /// * `n_estimators` - The amount of boosting stages.
    /// * `learning_rate` - The shrinkage applied to each stage's tree.
    /// * `max_depth` - The maximum depth of each stage's tree.
    /// * `subsample` - The fraction of rows every stage is fitted on, `1.0` uses them all.
    /// * `seed` - The seed of the row subsampling.
    pub fn new(
        n_estimators: usize,
        learning_rate: f64,
        max_depth: usize,
        subsample: f64,
        seed: u64,
    ) -> Self {
        Self {
            n_estimators,
            learning_rate,
            max_depth,
            subsample,
            seed,
            init: 0.0,
            n_features: 0,
            trees: Vec::new(),
        }
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn subsample(&self) -> f64 {
        self.subsample
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The amount of rows each stage is fitted on.
    fn stage_size(&self, n: usize) -> usize {
        ((self.subsample * n as f64).round() as usize).clamp(1, n)
    }
}

impl Regressor for GradientBoosting {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()> {
        check_fit_input(x, y)?;

        let n = x.nrows();
        let stage_size = self.stage_size(n);
        let all_rows: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);

        self.init = y.sum() / n as f64;
        self.n_features = x.ncols();
        self.trees = Vec::with_capacity(self.n_estimators);

        let mut raw = Array1::from_elem(n, self.init);
        for _ in 0..self.n_estimators {
            let residuals = &y - &raw;

            let mut tree = RegressionTree::new(Some(self.max_depth));
            if stage_size < n {
                let rows = index::sample(&mut rng, n, stage_size).into_vec();
                tree.fit_rows(x, residuals.view(), &rows)?;
            } else {
                tree.fit_rows(x, residuals.view(), &all_rows)?;
            }

            raw.scaled_add(self.learning_rate, &tree.predict(x)?);
            self.trees.push(tree);
        }

        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if self.n_features == 0 {
            return Err(MlErr::NotFitted {
                estimator: "GradientBoostingRegressor",
            });
        }

        check_predict_input(x, self.n_features)?;

        let mut raw = Array1::from_elem(x.nrows(), self.init);
        for tree in &self.trees {
            raw.scaled_add(self.learning_rate, &tree.predict(x)?);
        }

        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use super::*;
    use crate::metrics::{mean_squared_error, r2_score};

    fn sine(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((n, 1), |(i, _)| i as f64 / n as f64 * 6.0);
        let y = x.column(0).mapv(|v| 10.0 * v.sin());
        (x, y)
    }

    #[test]
    fn more_stages_lower_the_training_error() {
        let (x, y) = sine(300);

        let mut few = GradientBoosting::new(5, 0.1, 3, 1.0, 42);
        let mut many = GradientBoosting::new(100, 0.1, 3, 1.0, 42);
        few.fit(x.view(), y.view()).unwrap();
        many.fit(x.view(), y.view()).unwrap();

        let few_mse = mean_squared_error(y.view(), few.predict(x.view()).unwrap().view()).unwrap();
        let many_mse =
            mean_squared_error(y.view(), many.predict(x.view()).unwrap().view()).unwrap();

        assert!(many_mse < few_mse);
        assert!(r2_score(y.view(), many.predict(x.view()).unwrap().view()).unwrap() > 0.95);
    }

    #[test]
    fn zero_stages_predict_the_mean() {
        let (x, y) = sine(10);
        let mut model = GradientBoosting::new(0, 0.1, 3, 1.0, 42);
        model.fit(x.view(), y.view()).unwrap();

        let mean = y.sum() / 10.0;
        let pred = model.predict(x.view()).unwrap();
        assert!(pred.iter().all(|p| (p - mean).abs() < 1e-12));
    }

    #[test]
    fn subsampling_is_seeded() {
        let (x, y) = sine(200);

        let mut a = GradientBoosting::new(20, 0.1, 2, 0.5, 3);
        let mut b = GradientBoosting::new(20, 0.1, 2, 0.5, 3);
        a.fit(x.view(), y.view()).unwrap();
        b.fit(x.view(), y.view()).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn predict_before_fit_fails() {
        let model = GradientBoosting::new(10, 0.1, 3, 1.0, 42);
        assert!(matches!(
            model.predict(Array2::zeros((1, 1)).view()),
            Err(MlErr::NotFitted { .. })
        ));
    }
}
