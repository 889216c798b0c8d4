use machine_learning::{
    CustomerRecord, MlErr, artifact,
    specs::EstimatorSpec,
    training::{Candidate, Grid, Trainer, TrainingConfig},
};

fn mk_config(n_samples: usize) -> TrainingConfig {
    TrainingConfig {
        n_samples,
        ..Default::default()
    }
}

fn mk_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            name: "LinearRegression".into(),
            grid: Grid::Fixed(EstimatorSpec::Linear),
        },
        Candidate {
            name: "RandomForest".into(),
            grid: Grid::RandomForest {
                max_depth: vec![Some(3), Some(5)],
                n_estimators: vec![5],
                seed: 42,
            },
        },
        Candidate {
            name: "GradientBoosting".into(),
            grid: Grid::GradientBoosting {
                learning_rate: vec![0.1],
                n_estimators: vec![10, 20],
                max_depth: 3,
                subsample: 1.0,
                seed: 42,
            },
        },
    ]
}

fn reference_customer() -> CustomerRecord {
    CustomerRecord {
        age: 32,
        income: 72_000.0,
        loyalty_score: 7.0,
        region: "North".into(),
        visits_per_month: 5,
    }
}

#[test]
fn fixed_seed_reproduces_the_leaderboard() {
    let a = Trainer::with_candidates(mk_config(600), mk_candidates())
        .run()
        .unwrap();
    let b = Trainer::with_candidates(mk_config(600), mk_candidates())
        .run()
        .unwrap();

    assert_eq!(a.entries, b.entries);
    assert_eq!(a.best, b.best);
    assert_eq!(a.pipeline, b.pipeline);
}

#[test]
fn default_split_is_exactly_eighty_twenty() {
    let trainer = Trainer::new(TrainingConfig::default());
    let (train, test) = trainer.prepare_data().unwrap();

    assert_eq!(train.len(), 16_000);
    assert_eq!(test.len(), 4_000);
}

#[test]
fn winner_has_the_highest_held_out_r2() {
    let report = Trainer::with_candidates(mk_config(600), mk_candidates())
        .run()
        .unwrap();

    let names: Vec<_> = report.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["LinearRegression", "RandomForest", "GradientBoosting"]);

    let best = report.best_entry();
    for (i, entry) in report.entries.iter().enumerate() {
        assert!(entry.r2 <= best.r2);
        if i < report.best {
            assert!(entry.r2 < best.r2, "an earlier tie must have won");
        }
    }
}

#[test]
fn persisted_winner_predicts_like_the_in_memory_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = TrainingConfig {
        artifact_path: dir.path().join("regression_model.json"),
        ..mk_config(400)
    };
    let trainer = Trainer::with_candidates(config, mk_candidates());
    let report = trainer.run_and_save().unwrap();
    let loaded = artifact::load(&trainer.config().artifact_path).unwrap();
    assert_eq!(loaded, report.pipeline);

    let (train, _) = trainer.prepare_data().unwrap();
    for record in [reference_customer(), train.records()[0].clone()] {
        let expected = report.pipeline.predict_one(&record).unwrap();
        let got = loaded.predict_one(&record).unwrap();
        assert!((expected - got).abs() <= 1e-9 * expected.abs().max(1.0));
    }
}

#[test]
fn unseen_region_still_predicts() {
    let report = Trainer::with_candidates(mk_config(400), mk_candidates())
        .run()
        .unwrap();

    let record = CustomerRecord {
        region: "Atlantis".into(),
        ..reference_customer()
    };
    assert!(report.pipeline.predict_one(&record).unwrap().is_finite());
}

fn mk_failing_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            name: "LinearRegression".into(),
            grid: Grid::Fixed(EstimatorSpec::Linear),
        },
        Candidate {
            name: "GradientBoosting".into(),
            grid: Grid::GradientBoosting {
                learning_rate: vec![0.0],
                n_estimators: vec![10],
                max_depth: 3,
                subsample: 1.0,
                seed: 42,
            },
        },
    ]
}

#[test]
fn fitting_error_writes_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regression_model.json");
    let config = TrainingConfig {
        artifact_path: path.clone(),
        ..mk_config(300)
    };

    let result = Trainer::with_candidates(config, mk_failing_candidates()).run_and_save();
    assert!(matches!(result, Err(MlErr::InvalidParameter { .. })));
    assert!(!path.exists());
    assert!(!dir.path().join("regression_model.json.tmp").exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn fitting_error_keeps_the_previous_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regression_model.json");
    std::fs::write(&path, "previous").unwrap();
    let config = TrainingConfig {
        artifact_path: path.clone(),
        ..mk_config(300)
    };

    let result = Trainer::with_candidates(config, mk_failing_candidates()).run_and_save();
    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
    assert!(!dir.path().join("regression_model.json.tmp").exists());
}
