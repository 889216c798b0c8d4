use std::{env, path::PathBuf};

use crate::artifact::DEFAULT_ARTIFACT_PATH;

/// The constants of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// The amount of synthetic customers to generate.
    pub n_samples: usize,
    /// Seeds the generation, the split and every stochastic estimator.
    pub seed: u64,
    pub test_ratio: f64,
    pub cv_folds: usize,
    /// Where the best pipeline gets persisted.
    pub artifact_path: PathBuf,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_samples: 20_000,
            seed: 42,
            test_ratio: 0.2,
            cv_folds: 3,
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
        }
    }
}

impl TrainingConfig {
    /// The default configuration with the artifact path taken from `MODEL_PATH`, if set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = env::var("MODEL_PATH") {
            config.artifact_path = PathBuf::from(path);
        }

        config
    }
}
