use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while persisting exported data
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize gesture classes: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Writer went away before reporting a result")]
    Cancelled,
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors produced while reading path commands back into points
#[derive(Debug, Error, PartialEq)]
pub enum PathParseError {
    #[error("Unsupported path command '{0}'")]
    UnknownCommand(String),

    #[error("Malformed coordinate '{0}'")]
    BadCoordinate(String),

    #[error("Command '{0}' is missing its coordinate")]
    MissingCoordinate(char),
}

/// Errors that can occur while loading the surface configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
