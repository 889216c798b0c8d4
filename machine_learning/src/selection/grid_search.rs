use log::{debug, info};
use rayon::prelude::*;

use super::KFold;
use crate::{MlErr, Result, dataset::Dataset, pipeline::Pipeline, specs::EstimatorSpec};

/// The cross-validated score of one grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct CvResult {
    pub spec: EstimatorSpec,
    pub fold_scores: Vec<f64>,
    pub mean_score: f64,
}

/// The outcome of a grid search.
#[derive(Debug, Clone)]
pub struct GridSearchResult {
    pub best_spec: EstimatorSpec,
    pub best_score: f64,
    pub cv_results: Vec<CvResult>,
    /// The best grid point refitted on the whole dataset.
    pub pipeline: Pipeline,
}

/// Exhaustive search over a list of hyperparameter combinations, scored by the mean R² of a
/// k-fold cross-validation.
#[derive(Debug, Clone)]
pub struct GridSearch {
    grid: Vec<EstimatorSpec>,
    kfold: KFold,
}

impl GridSearch {
    /// Creates a new `GridSearch`.
    ///
    /// # Arguments
    /// * `grid` - The combinations to try, in the order ties are broken.
    /// * `kfold` - The cross-validation splitter.
    pub fn new(grid: Vec<EstimatorSpec>, kfold: KFold) -> Result<Self> {
        if grid.is_empty() {
            return Err(MlErr::NoCandidates);
        }

        Ok(Self { grid, kfold })
    }

    pub fn grid(&self) -> &[EstimatorSpec] {
        &self.grid
    }

    /// Scores every grid point and refits the best one over `data`.
    ///
    /// Every (grid point, fold) pair is fitted in parallel; the scores are gathered back in
    /// grid order, so the outcome doesn't depend on scheduling. The first grid point with the
    /// highest mean score wins.
    pub fn fit(&self, data: &Dataset) -> Result<GridSearchResult> {
        let folds: Vec<(Dataset, Dataset)> = self
            .kfold
            .split(data.len())?
            .into_iter()
            .map(|fold| (data.select(&fold.train), data.select(&fold.test)))
            .collect();

        let k = folds.len();
        let jobs: Vec<(usize, usize)> = (0..self.grid.len())
            .flat_map(|g| (0..k).map(move |f| (g, f)))
            .collect();

        let scores = jobs
            .into_par_iter()
            .map(|(g, f)| {
                let (train, test) = &folds[f];
                let pipeline = Pipeline::fit(&self.grid[g], train)?;
                Ok(pipeline.evaluate(test)?.r2)
            })
            .collect::<Result<Vec<f64>>>()?;

        let cv_results: Vec<CvResult> = self
            .grid
            .iter()
            .zip(scores.chunks(k))
            .map(|(spec, fold_scores)| {
                let mean_score = fold_scores.iter().sum::<f64>() / k as f64;
                debug!("cv {spec}: mean r2={mean_score:.4}");
                CvResult {
                    spec: *spec,
                    fold_scores: fold_scores.to_vec(),
                    mean_score,
                }
            })
            .collect();

        let mut best: Option<&CvResult> = None;
        for result in &cv_results {
            let best_score = best.map_or(f64::NEG_INFINITY, |b| b.mean_score);
            if result.mean_score > best_score {
                best = Some(result);
            }
        }

        let best = best.ok_or(MlErr::NoCandidates)?;
        let (best_spec, best_score) = (best.spec, best.mean_score);
        info!("best grid point {best_spec} with cv r2={best_score:.4}, refitting");

        let pipeline = Pipeline::fit(&best_spec, data)?;

        Ok(GridSearchResult {
            best_spec,
            best_score,
            cv_results,
            pipeline,
        })
    }
}
