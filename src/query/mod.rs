//! Legacy query handling
//!
//! Provides the request side and response side of the legacy search surface:
//! - Translator: url-encoded legacy body -> canonical `SearchRequest`
//! - Shaper: engine results -> legacy envelope
//! - Attributes: facet value lists for the legacy filter widgets
//! - Service: the entry points the request-handling layer calls

pub mod attributes;
pub mod service;
pub mod shaper;
pub mod translator;

use crate::models::DocumentError;
use crate::storage::EngineError;

/// Error decoding a legacy request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
    #[error("Invalid percent-encoding: {0}")]
    InvalidEncoding(String),
    #[error("Invalid sort specification: {0}")]
    InvalidSort(String),
    #[error("Unknown attribute lookup: {0}")]
    UnknownLookup(String),
}

impl QueryError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            QueryError::MissingParameter(name) => {
                format!(
                    "Missing parameter '{name}'.\n\nHint: Legacy searches must carry both 'size' and 'from'."
                )
            }
            QueryError::InvalidSort(reason) => {
                format!(
                    "Invalid sort specification: {reason}\n\n\
                    Hint: 'sort' must be a JSON array such as [{{\"title.keyword\":{{\"order\":\"asc\"}}}}]."
                )
            }
            QueryError::UnknownLookup(lookup) => {
                format!(
                    "Unknown attribute lookup '{lookup}'.\n\n\
                    Hint: Use one of {}.",
                    attributes::LOOKUPS.join(", ")
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error from a service entry point
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("Search engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("Stored document is invalid: {0}")]
    Document(#[from] DocumentError),
}

impl ServiceError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Query(e) => e.user_message(),
            ServiceError::Engine(EngineError::NetworkError(reason)) => {
                format!(
                    "Cannot reach the search engine: {reason}\n\n\
                    Hint: Check the engine host, port and API key in your configuration."
                )
            }
            _ => self.to_string(),
        }
    }
}

pub use attributes::lookup_attributes;
pub use service::OracleService;
pub use shaper::ResultShaper;
pub use translator::QueryTranslator;
