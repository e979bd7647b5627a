//! Collection schema management
//!
//! The target collection has a fixed field layout. `SchemaManager` makes sure
//! it exists before documents are written and turns engine conflicts into
//! non-fatal outcomes.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::CardDocument;
use crate::storage::{EngineError, SearchEngine};

/// One field of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub facet: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sort: bool,
}

impl FieldSchema {
    pub fn new(name: &str, field_type: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            facet: false,
            sort: false,
        }
    }

    pub fn faceted(mut self) -> Self {
        self.facet = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sort = true;
        self
    }
}

/// Collection definition as the engine expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
    pub default_sorting_field: String,
}

impl CollectionSchema {
    /// The card collection layout
    pub fn cards(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: vec![
                FieldSchema::new("cardid", "int32").faceted(),
                FieldSchema::new("type", "string[]").faceted(),
                FieldSchema::new("title", "string").sortable(),
                FieldSchema::new("id", "string"),
                FieldSchema::new("keywords", "string[]").faceted(),
                FieldSchema::new("clan", "string[]").faceted(),
                FieldSchema::new("legality", "string[]").faceted(),
            ],
            default_sorting_field: "cardid".to_string(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// What `ensure_collection` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOutcome {
    Created,
    /// Existing collection dropped and created again
    Recreated,
    /// Existing collection kept as is
    Existing,
}

/// What `insert_document` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyPresent,
}

/// Schema manager for one collection on one engine
pub struct SchemaManager<'a, E: SearchEngine + ?Sized> {
    engine: &'a E,
    schema: CollectionSchema,
}

impl<'a, E: SearchEngine + ?Sized> SchemaManager<'a, E> {
    pub fn new(engine: &'a E, schema: CollectionSchema) -> Self {
        Self { engine, schema }
    }

    pub fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    pub fn collection(&self) -> &str {
        &self.schema.name
    }

    /// Make sure the collection exists
    ///
    /// With `overwrite`, an existing collection is deleted and created again,
    /// losing its documents. Without it the existing collection is used as is.
    pub async fn ensure_collection(&self, overwrite: bool) -> Result<CollectionOutcome, EngineError> {
        match self.engine.create_collection(&self.schema).await {
            Ok(()) => {
                info!(collection = %self.schema.name, "Created collection");
                Ok(CollectionOutcome::Created)
            }
            Err(EngineError::AlreadyExists(_)) if overwrite => {
                info!(collection = %self.schema.name, "Collection exists, recreating");
                self.engine.delete_collection(&self.schema.name).await?;
                self.engine.create_collection(&self.schema).await?;
                Ok(CollectionOutcome::Recreated)
            }
            Err(EngineError::AlreadyExists(_)) => {
                info!(collection = %self.schema.name, "Collection already exists");
                Ok(CollectionOutcome::Existing)
            }
            Err(e) => Err(e),
        }
    }

    /// Insert a document, treating an existing id as already present
    pub async fn insert_document(&self, document: &CardDocument) -> Result<InsertOutcome, EngineError> {
        match self
            .engine
            .create_document(&self.schema.name, document)
            .await
        {
            Ok(()) => Ok(InsertOutcome::Inserted),
            Err(EngineError::AlreadyExists(_)) => {
                info!(card_id = %document.id, "Document already present, skipping");
                Ok(InsertOutcome::AlreadyPresent)
            }
            Err(e) => Err(e),
        }
    }
}
