//! CLI command implementations

pub mod attributes;
pub mod fetch;
pub mod ingest;
pub mod schema;
pub mod search;
