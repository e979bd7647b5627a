//! In-memory search engine
//!
//! Implements SearchEngine inside the process. Follows the same conflict
//! rules as a real engine so ingestion and query code can be exercised
//! without a server.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;

use async_trait::async_trait;

use super::{EngineError, SearchEngine};
use crate::models::{CardDocument, FilterField, SearchRequest, SearchResults, SortOrder};
use crate::schema::CollectionSchema;

#[derive(Debug, Default)]
struct Collection {
    // Insertion order is kept so ties sort deterministically
    documents: Vec<CardDocument>,
}

/// In-process engine holding collections in a lock-protected map
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    collections: RwLock<HashMap<String, Collection>>,
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::BackendError("In-memory engine lock poisoned".to_string())
}

fn attribute<'a>(doc: &'a CardDocument, field: FilterField) -> &'a [String] {
    match field {
        FilterField::Keywords => &doc.keywords,
        FilterField::Clan => &doc.clan,
        FilterField::Legality => &doc.legality,
        FilterField::Type => &doc.card_type,
    }
}

fn text_field<'a>(doc: &'a CardDocument, name: &str) -> Vec<&'a str> {
    match name {
        "title" => vec![doc.title.as_str()],
        "id" => vec![doc.id.as_str()],
        "text" => vec![doc.text.as_str()],
        "keywords" => doc.keywords.iter().map(String::as_str).collect(),
        "clan" => doc.clan.iter().map(String::as_str).collect(),
        _ => Vec::new(),
    }
}

fn matches_request(doc: &CardDocument, request: &SearchRequest) -> bool {
    let filters_ok = request.filters.iter().all(|filter| {
        let values = attribute(doc, filter.field);
        filter.values.iter().any(|v| values.contains(v))
    });
    if !filters_ok {
        return false;
    }
    if request.is_match_all() {
        return true;
    }

    let needle = request.q.to_lowercase();
    request
        .query_by
        .iter()
        .flat_map(|field| text_field(doc, field))
        .any(|value| value.to_lowercase().contains(&needle))
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub fn document_count(&self, collection: &str) -> Result<usize, EngineError> {
        let collections = self.collections.read().map_err(poisoned)?;
        collections
            .get(collection)
            .map(|c| c.documents.len())
            .ok_or_else(|| EngineError::NotFound(collection.to_string()))
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.collections
            .read()
            .map(|c| c.contains_key(name))
            .unwrap_or(false)
    }
}

#[async_trait]
impl SearchEngine for InMemoryEngine {
    async fn create_collection(&self, schema: &CollectionSchema) -> Result<(), EngineError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        if collections.contains_key(&schema.name) {
            return Err(EngineError::AlreadyExists(schema.name.clone()));
        }
        collections.insert(schema.name.clone(), Collection::default());
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<(), EngineError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        collections
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    async fn create_document(
        &self,
        collection: &str,
        document: &CardDocument,
    ) -> Result<(), EngineError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        let target = collections
            .get_mut(collection)
            .ok_or_else(|| EngineError::NotFound(collection.to_string()))?;
        if target.documents.iter().any(|d| d.id == document.id) {
            return Err(EngineError::AlreadyExists(document.id.clone()));
        }
        target.documents.push(document.clone());
        Ok(())
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<CardDocument, EngineError> {
        let collections = self.collections.read().map_err(poisoned)?;
        collections
            .get(collection)
            .ok_or_else(|| EngineError::NotFound(collection.to_string()))?
            .documents
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(id.to_string()))
    }

    async fn search(
        &self,
        collection: &str,
        request: &SearchRequest,
    ) -> Result<SearchResults, EngineError> {
        let started = Instant::now();
        let collections = self.collections.read().map_err(poisoned)?;
        let target = collections
            .get(collection)
            .ok_or_else(|| EngineError::NotFound(collection.to_string()))?;

        let mut found: Vec<&CardDocument> = target
            .documents
            .iter()
            .filter(|doc| matches_request(doc, request))
            .collect();

        if request.sort.field == "title" {
            found.sort_by(|a, b| a.title.cmp(&b.title));
        } else {
            found.sort_by_key(|doc| doc.cardid);
        }
        if request.sort.order == SortOrder::Desc {
            found.reverse();
        }

        let total = found.len() as u64;
        let hits = found
            .into_iter()
            .skip(request.offset)
            .take(request.limit)
            .cloned()
            .collect();

        Ok(SearchResults {
            found: total,
            search_time_ms: started.elapsed().as_millis() as u64,
            hits,
        })
    }
}
