use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{MlErr, Result};

pub trait Regressor {
    /// Fits the regressor to the feature matrix `x` and the targets `y`.
    ///
    /// # Arguments
    /// * `x` - The features, one row per sample.
    /// * `y` - The target of each sample.
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()>;

    /// Predicts the target of every row of `x`.
    ///
    /// # Returns
    /// One prediction per row or an error if the regressor isn't fitted or `x` has the wrong
    /// amount of columns.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>>;
}

/// Checks that `x` and `y` describe the same, non empty, set of samples.
pub(crate) fn check_fit_input(x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()> {
    if x.nrows() != y.len() {
        return Err(MlErr::SizeMismatch {
            what: "targets",
            got: y.len(),
            expected: x.nrows(),
        });
    }

    if x.is_empty() {
        return Err(MlErr::EmptyDataset {
            what: "training set",
        });
    }

    Ok(())
}

/// Checks that `x` has the amount of columns the regressor was fitted with.
pub(crate) fn check_predict_input(x: ArrayView2<f64>, n_features: usize) -> Result<()> {
    if x.ncols() != n_features {
        return Err(MlErr::SizeMismatch {
            what: "features",
            got: x.ncols(),
            expected: n_features,
        });
    }

    Ok(())
}
