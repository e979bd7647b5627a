//! Search engine abstraction
//!
//! Defines the SearchEngine trait and implementations for different engines:
//! - TypesenseClient: Typesense over HTTP (default)
//! - InMemoryEngine: in-process engine for tests and dry runs
//!
//! Engines are constructed explicitly and passed by reference into the
//! ingestion and query entry points; nothing here is process-global.

use async_trait::async_trait;

use crate::models::{CardDocument, SearchRequest, SearchResults};
use crate::schema::CollectionSchema;

/// Error type for search engine operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Search engine error: {0}")]
    BackendError(String),
}

/// Trait for document search engines
///
/// Create operations fail with `AlreadyExists` when the target is present,
/// and lookups fail with `NotFound`; callers decide how to treat both.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Create a collection
    async fn create_collection(&self, schema: &CollectionSchema) -> Result<(), EngineError>;

    /// Delete a collection and every document in it
    async fn delete_collection(&self, name: &str) -> Result<(), EngineError>;

    /// Insert one document
    async fn create_document(
        &self,
        collection: &str,
        document: &CardDocument,
    ) -> Result<(), EngineError>;

    /// Fetch one document by its `id`
    async fn get_document(&self, collection: &str, id: &str) -> Result<CardDocument, EngineError>;

    /// Run a search
    async fn search(
        &self,
        collection: &str,
        request: &SearchRequest,
    ) -> Result<SearchResults, EngineError>;
}

pub mod memory;

#[cfg(feature = "api-backend")]
pub mod typesense;

pub use memory::InMemoryEngine;
#[cfg(feature = "api-backend")]
pub use typesense::TypesenseClient;
