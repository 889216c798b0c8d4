use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::{
    Regressor,
    regressor::{check_fit_input, check_predict_input},
};
use crate::{MlErr, Result};

/// Relative ridge added to the normal equations so collinear columns (a full one-hot block
/// next to the intercept) still get the minimum norm solution.
const JITTER: f64 = 1e-10;

/// Ordinary least squares linear regression with an intercept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    coef: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Returns a new, unfitted, `LinearRegression`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coef(&self) -> &[f64] {
        &self.coef
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearRegression {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()> {
        check_fit_input(x, y)?;

        let n = x.nrows() as f64;
        let x_mean = x.sum_axis(Axis(0)) / n;
        let y_mean = y.sum() / n;

        let xc = &x - &x_mean;
        let yc = &y - y_mean;

        let mut gram = xc.t().dot(&xc);
        let rhs = xc.t().dot(&yc);

        let p = gram.nrows();
        let mean_diag = gram.diag().sum() / p as f64;
        let ridge = JITTER * mean_diag.max(1.0);
        gram.diag_mut().mapv_inplace(|d| d + ridge);

        let coef = solve_cholesky(gram, rhs)?;
        self.intercept = y_mean - x_mean.dot(&coef);
        self.coef = coef.to_vec();

        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if self.coef.is_empty() {
            return Err(MlErr::NotFitted {
                estimator: "LinearRegression",
            });
        }

        check_predict_input(x, self.coef.len())?;
        Ok(x.dot(&ArrayView1::from(self.coef.as_slice())) + self.intercept)
    }
}

/// Solves `a * z = b` for a symmetric positive definite `a`.
fn solve_cholesky(a: Array2<f64>, b: Array1<f64>) -> Result<Array1<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for j in 0..n {
        let diag = a[[j, j]] - (0..j).map(|k| l[[j, k]].powi(2)).sum::<f64>();
        if !(diag > 0.0) {
            return Err(MlErr::NotPositiveDefinite {
                what: "normal equations matrix",
            });
        }

        let ljj = diag.sqrt();
        l[[j, j]] = ljj;

        for i in j + 1..n {
            let dot: f64 = (0..j).map(|k| l[[i, k]] * l[[j, k]]).sum();
            l[[i, j]] = (a[[i, j]] - dot) / ljj;
        }
    }

    // L * w = b
    let mut w = Array1::<f64>::zeros(n);
    for i in 0..n {
        let dot: f64 = (0..i).map(|k| l[[i, k]] * w[k]).sum();
        w[i] = (b[i] - dot) / l[[i, i]];
    }

    // L^T * z = w
    let mut z = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let dot: f64 = (i + 1..n).map(|k| l[[k, i]] * z[k]).sum();
        z[i] = (w[i] - dot) / l[[i, i]];
    }

    Ok(z)
}
