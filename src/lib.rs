//! Card Oracle SDK - card catalog ingestion and legacy search translation
//!
//! Provides unified interfaces for:
//! - Catalog import and card normalization
//! - Collection schema management against a search engine
//! - Legacy search request translation and response shaping
//! - Printing artwork derivation

pub mod config;
pub mod images;
pub mod import;
pub mod mappings;
pub mod models;
pub mod query;
pub mod schema;
pub mod storage;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use storage::{EngineError, InMemoryEngine, SearchEngine};
#[cfg(feature = "api-backend")]
pub use storage::TypesenseClient;

pub use config::{ConfigError, EngineConfig, ImageConfig, IngestPolicy, LegacyConfig, OracleConfig};
pub use images::{DeriveOutcome, ImageDeriver, ImageError, ImageRequest};
#[cfg(feature = "image-derive")]
pub use images::FileSystemImageDeriver;
pub use import::{CardNormalizer, CatalogIngestor, CatalogReader, ImportError, IngestError, IngestStats};
pub use query::{OracleService, QueryError, QueryTranslator, ResultShaper, ServiceError};
pub use schema::{CollectionOutcome, CollectionSchema, InsertOutcome, SchemaManager};

// Re-export models
pub use models::{
    Card, CardDocument, CardKind, CardType, Deck, LegacyEnvelope, Printing, SearchRequest,
    SearchResults,
};
