use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{
    RegressionTree, Regressor,
    regressor::{check_fit_input, check_predict_input},
};
use crate::{MlErr, Result};

/// A random forest: the average of regression trees, each one grown on a bootstrap sample
/// of the training rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_estimators: usize,
    max_depth: Option<usize>,
    seed: u64,
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Creates a new, unfitted, `RandomForest`.
    ///
    /// # Arguments
    /// * `n_estimators` - The amount of trees.
    /// * `max_depth` - The maximum depth of each tree.
    /// * `seed` - The seed every bootstrap sample derives from.
    pub fn new(n_estimators: usize, max_depth: Option<usize>, seed: u64) -> Self {
        Self {
            n_estimators,
            max_depth,
            seed,
            n_features: 0,
            trees: Vec::new(),
        }
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}

impl Regressor for RandomForest {
    /// Grows the trees in parallel. Every tree gets its own seed, drawn up front from the
    /// forest's seed, so the result doesn't depend on the scheduling.
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()> {
        check_fit_input(x, y)?;

        let n = x.nrows();
        let max_depth = self.max_depth;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let seeds: Vec<u64> = (0..self.n_estimators).map(|_| rng.random()).collect();

        let trees = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let rows: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();

                let mut tree = RegressionTree::new(max_depth);
                tree.fit_rows(x, y, &rows)?;
                Ok(tree)
            })
            .collect::<Result<Vec<_>>>()?;

        self.n_features = x.ncols();
        self.trees = trees;
        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(MlErr::NotFitted {
                estimator: "RandomForestRegressor",
            });
        }

        check_predict_input(x, self.n_features)?;

        let mut sum = Array1::<f64>::zeros(x.nrows());
        for tree in &self.trees {
            sum += &tree.predict(x)?;
        }

        Ok(sum / self.trees.len() as f64)
    }
}
