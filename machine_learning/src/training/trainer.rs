use log::{debug, info};

use super::{Candidate, Grid, TrainingConfig, catalog};
use crate::{
    MlErr, Result, artifact,
    dataset::Dataset,
    pipeline::Pipeline,
    selection::{GridSearch, KFold, Leaderboard, LeaderboardEntry},
    synthetic::CustomerGenerator,
};

/// The outcome of a training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// One entry per candidate, in catalog order.
    pub entries: Vec<LeaderboardEntry>,
    /// The index of the winning entry.
    pub best: usize,
    /// The winning pipeline, fitted on the train partition.
    pub pipeline: Pipeline,
}

impl TrainingReport {
    pub fn best_entry(&self) -> &LeaderboardEntry {
        &self.entries[self.best]
    }
}

/// Runs the whole training flow: data generation, split, per candidate fitting and selection.
pub struct Trainer {
    config: TrainingConfig,
    candidates: Vec<Candidate>,
}

impl Trainer {
    /// Creates a new `Trainer` comparing the default catalog.
    pub fn new(config: TrainingConfig) -> Self {
        let candidates = catalog(config.seed);
        Self { config, candidates }
    }

    /// Creates a new `Trainer` comparing the given candidates, in order.
    pub fn with_candidates(config: TrainingConfig, candidates: Vec<Candidate>) -> Self {
        Self { config, candidates }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Generates the dataset and splits it in its `(train, test)` partitions.
    pub fn prepare_data(&self) -> Result<(Dataset, Dataset)> {
        let TrainingConfig {
            n_samples,
            seed,
            test_ratio,
            ..
        } = self.config;

        let data = CustomerGenerator::new(seed)?.dataset(n_samples);
        let (train, test) = data.train_test_split(test_ratio, seed)?;
        info!(
            "generated {} customers, train={} test={}",
            data.len(),
            train.len(),
            test.len()
        );

        Ok((train, test))
    }

    /// Runs the training flow.
    ///
    /// # Returns
    /// The leaderboard and the pipeline with the highest held-out R², or the first error
    /// raised while fitting any candidate.
    pub fn run(&self) -> Result<TrainingReport> {
        let (train, test) = self.prepare_data()?;
        let kfold = KFold::new(self.config.cv_folds)?;

        let mut leaderboard = Leaderboard::new();
        for candidate in &self.candidates {
            let pipeline = self.fit_candidate(candidate, kfold, &train)?;
            let scores = pipeline.evaluate(&test)?;

            let entry = LeaderboardEntry {
                name: candidate.name.clone(),
                r2: scores.r2,
                mse: scores.mse,
            };
            debug!("{entry}");

            if leaderboard.record(entry, pipeline) {
                debug!("{} is the new best candidate", candidate.name);
            }
        }

        let (entries, best) = leaderboard.into_parts();
        let (best, pipeline) = best.ok_or(MlErr::NoCandidates)?;

        Ok(TrainingReport {
            entries,
            best,
            pipeline,
        })
    }

    /// Runs the training flow and persists the winner at the configured `artifact_path`.
    ///
    /// Nothing is written unless every candidate fits, so a failed run leaves whatever
    /// artifact was already at that path untouched.
    pub fn run_and_save(&self) -> Result<TrainingReport> {
        let report = self.run()?;
        artifact::save(&self.config.artifact_path, &report.pipeline)?;
        info!(
            "saved {} at {}",
            report.best_entry().name,
            self.config.artifact_path.display()
        );
        Ok(report)
    }

    fn fit_candidate(
        &self,
        candidate: &Candidate,
        kfold: KFold,
        train: &Dataset,
    ) -> Result<Pipeline> {
        match &candidate.grid {
            Grid::Fixed(spec) => {
                info!("fitting {}", candidate.name);
                Pipeline::fit(spec, train)
            }
            grid => {
                info!(
                    "searching {} over {} combinations with {}-fold cv",
                    candidate.name,
                    grid.expand().len(),
                    kfold.k()
                );
                let search = GridSearch::new(grid.expand(), kfold)?;
                Ok(search.fit(train)?.pipeline)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::EstimatorSpec;

    fn small_config() -> TrainingConfig {
        TrainingConfig {
            n_samples: 300,
            ..Default::default()
        }
    }

    #[test]
    fn report_has_one_entry_per_candidate() {
        let candidates = vec![
            Candidate {
                name: "LinearRegression".into(),
                grid: Grid::Fixed(EstimatorSpec::Linear),
            },
            Candidate {
                name: "RandomForest".into(),
                grid: Grid::RandomForest {
                    max_depth: vec![Some(3)],
                    n_estimators: vec![5, 10],
                    seed: 42,
                },
            },
        ];
        let report = Trainer::with_candidates(small_config(), candidates)
            .run()
            .unwrap();

        assert_eq!(report.entries.len(), 2);
        let best = report.best_entry();
        assert!(report.entries.iter().all(|e| e.r2 <= best.r2));
    }

    #[test]
    fn identical_candidates_keep_the_first() {
        let candidates = vec![
            Candidate {
                name: "first".into(),
                grid: Grid::Fixed(EstimatorSpec::Linear),
            },
            Candidate {
                name: "second".into(),
                grid: Grid::Fixed(EstimatorSpec::Linear),
            },
        ];
        let report = Trainer::with_candidates(small_config(), candidates)
            .run()
            .unwrap();

        assert_eq!(report.entries[0].r2, report.entries[1].r2);
        assert_eq!(report.best, 0);
        assert_eq!(report.best_entry().name, "first");
    }

    #[test]
    fn empty_catalog_has_no_winner() {
        let trainer = Trainer::with_candidates(small_config(), vec![]);
        assert!(matches!(trainer.run(), Err(MlErr::NoCandidates)));
    }

    #[test]
    fn fitting_errors_abort_the_run() {
        let candidates = vec![Candidate {
            name: "broken".into(),
            grid: Grid::Fixed(EstimatorSpec::RandomForest {
                n_estimators: 0,
                max_depth: None,
                seed: 42,
            }),
        }];
        let trainer = Trainer::with_candidates(small_config(), candidates);
        assert!(matches!(
            trainer.run(),
            Err(MlErr::InvalidParameter { .. })
        ));
    }
}
