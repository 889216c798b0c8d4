use crate::specs::{DEFAULT_BOOSTING_DEPTH, EstimatorSpec};

/// The hyperparameter space of one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Grid {
    /// A single combination, fitted once without cross-validation.
    Fixed(EstimatorSpec),
    RandomForest {
        max_depth: Vec<Option<usize>>,
        n_estimators: Vec<usize>,
        seed: u64,
    },
    GradientBoosting {
        learning_rate: Vec<f64>,
        n_estimators: Vec<usize>,
        max_depth: usize,
        subsample: f64,
        seed: u64,
    },
}

impl Grid {
    /// Whether the candidate has to go through a grid search.
    pub fn is_searched(&self) -> bool {
        !matches!(self, Grid::Fixed(_))
    }

    /// Lists every combination of the grid.
    ///
    /// Parameters are taken in alphabetical order with the last one varying fastest.
    pub fn expand(&self) -> Vec<EstimatorSpec> {
        match self {
            Grid::Fixed(spec) => vec![*spec],
            Grid::RandomForest {
                max_depth,
                n_estimators,
                seed,
            } => max_depth
                .iter()
                .flat_map(|&max_depth| {
                    n_estimators
                        .iter()
                        .map(move |&n_estimators| EstimatorSpec::RandomForest {
                            n_estimators,
                            max_depth,
                            seed: *seed,
                        })
                })
                .collect(),
            Grid::GradientBoosting {
                learning_rate,
                n_estimators,
                max_depth,
                subsample,
                seed,
            } => learning_rate
                .iter()
                .flat_map(|&learning_rate| {
                    n_estimators
                        .iter()
                        .map(move |&n_estimators| EstimatorSpec::GradientBoosting {
                            n_estimators,
                            learning_rate,
                            max_depth: *max_depth,
                            subsample: *subsample,
                            seed: *seed,
                        })
                })
                .collect(),
        }
    }
}

/// A named entry of the model catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub grid: Grid,
}

/// The candidates every training run compares, in declaration order.
///
/// # Arguments
/// * `seed` - The seed of the stochastic estimators.
pub fn catalog(seed: u64) -> Vec<Candidate> {
    vec![
        Candidate {
            name: "LinearRegression".into(),
            grid: Grid::Fixed(EstimatorSpec::Linear),
        },
        Candidate {
            name: "RandomForest".into(),
            grid: Grid::RandomForest {
                max_depth: vec![Some(5), Some(10)],
                n_estimators: vec![50, 100],
                seed,
            },
        },
        Candidate {
            name: "GradientBoosting".into(),
            grid: Grid::GradientBoosting {
                learning_rate: vec![0.05, 0.1],
                n_estimators: vec![50, 100],
                max_depth: DEFAULT_BOOSTING_DEPTH,
                subsample: 1.0,
                seed,
            },
        },
    ]
}
