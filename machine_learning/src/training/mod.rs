mod catalog;
mod config;
mod trainer;

pub use catalog::{Candidate, Grid, catalog};
pub use config::TrainingConfig;
pub use trainer::{Trainer, TrainingReport};
