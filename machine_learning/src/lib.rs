//! Regression on synthetic customer data: generation, preprocessing, estimators, model
//! selection and artifact persistence.

pub mod artifact;
pub mod dataset;
pub mod error;
pub mod estimators;
pub mod metrics;
pub mod pipeline;
pub mod preprocessing;
pub mod record;
pub mod selection;
pub mod specs;
pub mod synthetic;
pub mod training;

pub use error::{MlErr, Result};
pub use pipeline::{Pipeline, Scores};
pub use record::{CustomerRecord, FeatureSchema};
