use anyhow::{Context, Result};
use env_logger::Env;
use log::info;

use machine_learning::training::{Trainer, TrainingConfig};

fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = TrainingConfig::from_env();
    info!(
        "training on {} synthetic customers with seed {}",
        config.n_samples, config.seed
    );

    let trainer = Trainer::new(config);
    let report = trainer.run_and_save().with_context(|| {
        format!(
            "training failed, nothing written at {}",
            trainer.config().artifact_path.display()
        )
    })?;

    println!("\nLeaderboard (Regression with GridSearch)");
    for entry in &report.entries {
        println!("{entry}");
    }

    println!("Best Model Details\n {}", report.pipeline);
    println!("Best R2 Score\t {}", round4(report.best_entry().r2));

    Ok(())
}
