//! Entry points for the request-handling layer
//!
//! The service borrows an engine handle owned by the caller and holds no
//! mutable state, so one instance can serve concurrent requests.

use serde_json::Value;
use tracing::{debug, info};

use super::ServiceError;
use super::attributes::attributes_for_body;
use super::shaper::ResultShaper;
use super::translator::QueryTranslator;
use crate::config::OracleConfig;
use crate::models::{Card, CardDocument, LegacyEnvelope, SearchRequest, UpdateLog};
use crate::storage::{EngineError, SearchEngine};

/// Query façade over one collection
pub struct OracleService<'a, E: SearchEngine + ?Sized> {
    engine: &'a E,
    collection: String,
    translator: QueryTranslator,
    shaper: ResultShaper,
}

impl<'a, E: SearchEngine + ?Sized> OracleService<'a, E> {
    pub fn new(engine: &'a E, config: &OracleConfig) -> Self {
        Self {
            engine,
            collection: config.collection.clone(),
            translator: QueryTranslator::new(),
            shaper: ResultShaper::new(&config.legacy),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Decode a legacy body, run it, and wrap the results
    pub async fn translate_and_search(&self, raw_body: &str) -> Result<LegacyEnvelope, ServiceError> {
        let request = self.translator.translate(raw_body)?;
        self.search(&request).await
    }

    /// Run a canonical request
    ///
    /// A missing collection means nothing has been ingested yet and yields
    /// the empty envelope.
    pub async fn search(&self, request: &SearchRequest) -> Result<LegacyEnvelope, ServiceError> {
        debug!(
            q = %request.q,
            filter_by = %request.filter_by(),
            offset = request.offset,
            limit = request.limit,
            "Searching"
        );
        match self.engine.search(&self.collection, request).await {
            Ok(results) => Ok(self.shaper.shape(results)),
            Err(EngineError::NotFound(what)) => {
                info!(collection = %self.collection, missing = %what, "No results: collection not found");
                Ok(LegacyEnvelope::empty())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch one stored document by catalog id
    pub async fn fetch_by_id(&self, id: &str) -> Result<Option<CardDocument>, ServiceError> {
        match self.engine.get_document(&self.collection, id).await {
            Ok(document) => Ok(Some(document)),
            Err(EngineError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch one card by catalog id as its typed record
    pub async fn fetch_card(&self, id: &str) -> Result<Option<Card>, ServiceError> {
        match self.fetch_by_id(id).await? {
            Some(document) => Ok(Some(Card::try_from(document)?)),
            None => Ok(None),
        }
    }

    /// Facet value list for a legacy attributes body
    pub fn attributes(&self, raw_body: &str) -> Result<Value, ServiceError> {
        Ok(attributes_for_body(raw_body)?)
    }

    /// Legacy update log
    ///
    /// No change history is recorded, so the log is always empty.
    pub fn update_log(&self) -> UpdateLog {
        UpdateLog::default()
    }
}
