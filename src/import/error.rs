//! Error types for catalog import and ingestion

use std::path::PathBuf;
use thiserror::Error;

use crate::storage::EngineError;

/// Errors raised while reading or normalizing catalog records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// Catalog is not well-formed XML
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Catalog could not be read
    #[error("IO error: {0}")]
    IoError(String),

    /// Card element lacks a required attribute
    #[error("Card {card_id}: missing '{attribute}' attribute")]
    MissingAttribute {
        card_id: String,
        attribute: &'static str,
    },

    /// Card lacks an element its type requires
    #[error("Card {card_id}: missing mandatory '{field}' element")]
    MissingField {
        card_id: String,
        field: &'static str,
    },

    /// Raw type is eligible but belongs to no deck bucket
    #[error("Card {card_id}: type '{card_type}' has no deck bucket")]
    UnmappedDeck { card_id: String, card_type: String },

    /// Raw type is eligible but has no canonical type or attribute layout
    #[error("Card {card_id}: unsupported card type '{card_type}'")]
    UnsupportedType { card_id: String, card_type: String },

    /// Image file name carries no collector number
    #[error("Card {card_id}: no collector number in image '{image}'")]
    InvalidCollectorNumber { card_id: String, image: String },

    /// Two catalog ids derive the same numeric card identity
    #[error("Card {card_id}: card number {card_number} already taken by {other_id}")]
    CardNumberCollision {
        card_id: String,
        other_id: String,
        card_number: u32,
    },

    /// Rarity element holds a code with no canonical mapping
    #[error("Card {card_id}: unknown rarity '{rarity}'")]
    UnknownRarity { card_id: String, rarity: String },
}

impl ImportError {
    /// Whether this error is a per-record configuration error
    ///
    /// Configuration errors abort the current record only. Parse and IO
    /// errors concern the whole catalog.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, ImportError::ParseError(_) | ImportError::IoError(_))
    }
}

/// Errors that abort an ingestion run
#[derive(Error, Debug)]
pub enum IngestError {
    /// Catalog file not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Catalog parse error or, in strict mode, a record error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Search engine failure
    #[error("Search engine error: {0}")]
    Engine(#[from] EngineError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            IngestError::FileNotFound(path) => {
                format!(
                    "File not found: {}\n\nHint: Check that the catalog file exists and the path is correct.",
                    path.display()
                )
            }
            IngestError::Import(ImportError::ParseError(reason)) => {
                format!(
                    "Catalog is not valid XML: {reason}\n\nHint: Check the catalog around the reported position."
                )
            }
            IngestError::Import(err) if err.is_configuration_error() => {
                format!(
                    "{err}\n\nHint: Run without --strict to skip invalid records and keep going."
                )
            }
            IngestError::Engine(EngineError::NetworkError(reason)) => {
                format!(
                    "Cannot reach the search engine: {reason}\n\n\
                    Hint: Check the engine host, port and API key in your configuration."
                )
            }
            _ => self.to_string(),
        }
    }
}
