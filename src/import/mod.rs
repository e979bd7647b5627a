//! Catalog import
//!
//! Turns the source card catalog into canonical cards:
//! - catalog: XML reader producing raw records
//! - normalizer: raw record -> Card, or an exclusion
//! - printings: edition images -> numbered printings
//! - text: title variants and ability text / keyword splitting
//! - ingest: batch driver writing documents to a search engine

pub mod catalog;
pub mod error;
pub mod ingest;
pub mod normalizer;
pub mod printings;
pub mod text;

pub use catalog::{Catalog, CatalogReader, RawCard, RawElement};
pub use error::{ImportError, IngestError};
pub use ingest::{CatalogIngestor, IngestStats};
pub use normalizer::CardNormalizer;
