mod boosting;
mod builder;
mod estimator;
mod forest;
mod linear;
mod regressor;
mod tree;

pub use boosting::GradientBoosting;
pub use builder::EstimatorBuilder;
pub use estimator::Estimator;
pub use forest::RandomForest;
pub use linear::LinearRegression;
pub use regressor::Regressor;
pub use tree::{Node, RegressionTree};
