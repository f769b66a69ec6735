//! FILENAME: app/src/error.rs

use persistence::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to load {dataset} data: {reason}")]
    DataSource { dataset: String, reason: String },

    #[error("Preferences error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Logging error: {0}")]
    Logging(String),
}
