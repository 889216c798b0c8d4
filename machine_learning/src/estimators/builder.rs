use super::{Estimator, GradientBoosting, LinearRegression, RandomForest};
use crate::{MlErr, Result, specs::EstimatorSpec};

/// Builds unfitted `Estimator`s out of `EstimatorSpec`s.
#[derive(Default)]
pub struct EstimatorBuilder;

impl EstimatorBuilder {
    /// Creates a new `EstimatorBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Estimator` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The regressor kind and its hyperparameters.
    ///
    /// # Returns
    /// The unfitted estimator or an error if any hyperparameter is out of range.
    pub fn build(&self, spec: &EstimatorSpec) -> Result<Estimator> {
        match *spec {
            EstimatorSpec::Linear => Ok(Estimator::Linear(LinearRegression::new())),
            EstimatorSpec::RandomForest {
                n_estimators,
                max_depth,
                seed,
            } => self.resolve_forest(n_estimators, max_depth, seed),
            EstimatorSpec::GradientBoosting {
                n_estimators,
                learning_rate,
                max_depth,
                subsample,
                seed,
            } => self.resolve_boosting(n_estimators, learning_rate, max_depth, subsample, seed),
        }
    }

    fn resolve_forest(
        &self,
        n_estimators: usize,
        max_depth: Option<usize>,
        seed: u64,
    ) -> Result<Estimator> {
        positive("n_estimators", n_estimators)?;
        if let Some(depth) = max_depth {
            positive("max_depth", depth)?;
        }

        let forest = RandomForest::new(n_estimators, max_depth, seed);
        Ok(Estimator::RandomForest(forest))
    }

    fn resolve_boosting(
        &self,
        n_estimators: usize,
        learning_rate: f64,
        max_depth: usize,
        subsample: f64,
        seed: u64,
    ) -> Result<Estimator> {
        positive("n_estimators", n_estimators)?;
        positive("max_depth", max_depth)?;

        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(MlErr::InvalidParameter {
                name: "learning_rate",
                reason: format!("expected a positive number, got {learning_rate}"),
            });
        }

        if !(subsample > 0.0 && subsample <= 1.0) {
            return Err(MlErr::InvalidParameter {
                name: "subsample",
                reason: format!("expected a value in (0, 1], got {subsample}"),
            });
        }

        let boosting =
            GradientBoosting::new(n_estimators, learning_rate, max_depth, subsample, seed);
        Ok(Estimator::GradientBoosting(boosting))
    }
}

fn positive(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(MlErr::InvalidParameter {
            name,
            reason: "expected a positive integer, got 0".into(),
        });
    }

    Ok(())
}
