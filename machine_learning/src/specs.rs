use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The default depth of the trees of a `GradientBoosting` stage.
pub const DEFAULT_BOOSTING_DEPTH: usize = 3;

/// Describes one regressor with one combination of hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorSpec {
    Linear,
    RandomForest {
        n_estimators: usize,
        max_depth: Option<usize>,
        seed: u64,
    },
    GradientBoosting {
        n_estimators: usize,
        learning_rate: f64,
        max_depth: usize,
        subsample: f64,
        seed: u64,
    },
}

impl Display for EstimatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimatorSpec::Linear => write!(f, "linear"),
            EstimatorSpec::RandomForest {
                n_estimators,
                max_depth,
                ..
            } => match max_depth {
                Some(depth) => write!(f, "max_depth={depth} n_estimators={n_estimators}"),
                None => write!(f, "max_depth=None n_estimators={n_estimators}"),
            },
            EstimatorSpec::GradientBoosting {
                n_estimators,
                learning_rate,
                ..
            } => write!(f, "learning_rate={learning_rate} n_estimators={n_estimators}"),
        }
    }
}
