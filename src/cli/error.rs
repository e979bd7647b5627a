//! CLI error type

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::images::ImageError;
use crate::import::IngestError;
use crate::query::ServiceError;
use crate::storage::EngineError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Search engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Message printed to stderr before exiting
    pub fn user_message(&self) -> String {
        match self {
            CliError::Ingest(e) => e.user_message(),
            CliError::Service(e) => e.user_message(),
            CliError::Engine(EngineError::NetworkError(reason)) => {
                format!(
                    "Cannot reach the search engine: {reason}\n\n\
                    Hint: Check the engine host, port and API key in your configuration."
                )
            }
            _ => self.to_string(),
        }
    }
}
