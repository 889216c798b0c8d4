use std::{env, path::PathBuf};

use machine_learning::artifact::DEFAULT_ARTIFACT_PATH;

use crate::error::ConfigError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// Where the service listens and which artifact it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
        }
    }
}

impl ServerConfig {
    /// Reads `HOST`, `PORT` and `MODEL_PATH`, falling back to the defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|_| ConfigError {
                var: "PORT",
                reason: format!("expected a port number, got {port:?}"),
            })?;
        }

        if let Some(path) = lookup("MODEL_PATH") {
            config.model_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// The `host:port` address to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
