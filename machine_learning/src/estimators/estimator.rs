use std::fmt::{self, Display};

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{GradientBoosting, LinearRegression, RandomForest, Regressor};
use crate::Result;

/// Every regressor a pipeline can end with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimator {
    Linear(LinearRegression),
    RandomForest(RandomForest),
    GradientBoosting(GradientBoosting),
}

impl Estimator {
    /// The name of the kind of regressor.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear(_) => "LinearRegression",
            Self::RandomForest(_) => "RandomForestRegressor",
            Self::GradientBoosting(_) => "GradientBoostingRegressor",
        }
    }
}

impl Regressor for Estimator {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()> {
        match self {
            Self::Linear(m) => m.fit(x, y),
            Self::RandomForest(m) => m.fit(x, y),
            Self::GradientBoosting(m) => m.fit(x, y),
        }
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        match self {
            Self::Linear(m) => m.predict(x),
            Self::RandomForest(m) => m.predict(x),
            Self::GradientBoosting(m) => m.predict(x),
        }
    }
}

impl Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Self::Linear(_) => write!(f, "{name}()"),
            Self::RandomForest(m) => {
                write!(f, "{name}(")?;
                if let Some(depth) = m.max_depth() {
                    write!(f, "max_depth={depth}, ")?;
                }
                write!(
                    f,
                    "n_estimators={}, random_state={})",
                    m.n_estimators(),
                    m.seed()
                )
            }
            Self::GradientBoosting(m) => write!(
                f,
                "{name}(learning_rate={}, max_depth={}, n_estimators={}, subsample={}, random_state={})",
                m.learning_rate(),
                m.max_depth(),
                m.n_estimators(),
                m.subsample(),
                m.seed()
            ),
        }
    }
}
