use thiserror::Error;

/// Top-level error type for the Aurora simulator.
#[derive(Error, Debug)]
pub enum AuroraError {
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for AuroraError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
