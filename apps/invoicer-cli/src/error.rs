//! Error types for the CLI configuration layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No explicit path and no platform config directory.
    #[error("No config path available")]
    NoConfigPath,

    #[error("Config file already exists: {0}")]
    AlreadyExists(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
