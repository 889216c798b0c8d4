use std::{path::Path, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use machine_learning::{Pipeline, artifact};

pub mod config;
pub mod error;
pub mod routes;
pub mod validation;

pub use config::ServerConfig;
pub use error::{ApiError, ConfigError, FieldError, Loc};

/// State shared by every request handler: the pipeline loaded at startup.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Loads and verifies the artifact at `path`.
    pub fn from_artifact<P: AsRef<Path>>(path: P) -> machine_learning::Result<Self> {
        artifact::load(path).map(Self::new)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

/// Builds the service's router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::liveness))
        .route("/predict", post(routes::predict))
        .with_state(state)
}
