use swarm_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Unable to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
